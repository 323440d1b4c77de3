//! Adapters for external dependencies.

pub mod carousels_sea;
pub mod institutes_sea;
pub mod notices_sea;
pub mod photos_sea;
pub mod users_sea;

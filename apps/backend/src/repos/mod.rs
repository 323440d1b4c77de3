//! Repository functions for the domain layer.
//!
//! Everything tenant-owned takes a [`TenantId`](crate::auth::TenantId) taken
//! from the verified claim and applies it to every query. A row that belongs
//! to another institute is reported as not found.

pub mod carousels;
pub mod institutes;
pub mod notices;
pub mod photos;
pub mod users;

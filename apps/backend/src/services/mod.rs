//! Operations that span more than one repository or collaborator.

pub mod auth;
pub mod bootstrap;
pub mod photos;
pub mod users;

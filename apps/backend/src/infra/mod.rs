//! Infrastructure layer: database connection, state construction and
//! datastore error translation.

pub mod db;
pub mod db_errors;
pub mod state;

#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod factory;

// Re-export only what current tests actually import
pub use app_builder::{build_test_context, init_app, TestContext};

//! Test support shared by service tests.

pub mod helpers;

pub use context::TestContext;

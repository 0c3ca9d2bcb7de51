//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Services are tested against the in-memory repositories here. HTTP-level
//! tests in `integration_tests` drive the real router over the SeaORM
//! adapters backed by `sea_orm::MockDatabase`.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

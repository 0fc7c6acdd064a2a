//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The mocks record every call so tests can assert exactly which requests
//! a selection made.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

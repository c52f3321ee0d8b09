//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - The in-memory stores share state through clones, so a test can hand one
//!   to a service and still inspect what was written

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

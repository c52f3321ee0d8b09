//! HTTP handlers
//!
//! The operation router plus one module of request/response types and
//! operation functions per resource.

pub mod customers;
pub mod graphql;
pub mod orders;
pub mod products;
pub mod reports;

pub use graphql::graphql;

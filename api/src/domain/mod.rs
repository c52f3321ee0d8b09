//! Domain layer
//!
//! Business rules with no knowledge of HTTP or SQL.
//! - `entities`: Customers, products, orders, the restock policy and listing types
//! - `ports`: Repository traits the adapters implement
//!
//! Errors are `DomainError`. Entities only pull in value-type crates.

pub mod entities;
pub mod ports;

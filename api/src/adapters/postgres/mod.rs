//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod customer_repo;
pub mod order_repo;
pub mod product_repo;
pub mod schema;

#[cfg(test)]
mod integration_tests;

pub use customer_repo::PostgresCustomerRepository;
pub use order_repo::PostgresOrderRepository;
pub use product_repo::PostgresProductRepository;
pub use schema::ensure_schema;

/// Build a lowercase `LIKE` pattern matching `needle` anywhere, with the
/// wildcard characters in `needle` escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

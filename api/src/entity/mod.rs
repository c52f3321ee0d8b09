//! SeaORM table models
//!
//! Row-level representations of the PostgreSQL tables. Domain code never
//! sees these; adapters convert them into `domain::entities` types.

pub mod customers;
pub mod order_products;
pub mod orders;
pub mod products;

//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod customer_service;
pub mod order_service;
pub mod product_service;
pub mod restock_service;

pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use product_service::ProductService;
pub use restock_service::RestockService;

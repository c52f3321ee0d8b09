//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod customer;
pub mod order;
pub mod product;
pub mod query;
pub mod restock;

pub use customer::{is_valid_phone, Customer, CustomerId, NewCustomer};
pub use order::{NewOrder, Order, OrderDetails, OrderId};
pub use product::{NewProduct, Product, ProductId};
pub use query::{
    CustomerFilter, CustomerSort, CustomerSortField, OrderFilter, OrderSort, OrderSortField,
    Page, Paginated, ProductFilter, ProductSort, ProductSortField, Sort,
};
pub use restock::{RestockOutcome, RestockPolicy};

//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//! Every method that writes more than one row must be atomic: either all of
//! its rows are committed or none are.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Customer, CustomerFilter, CustomerId, CustomerSort, NewCustomer, NewOrder, NewProduct, Order,
    OrderFilter, OrderId, OrderSort, Page, Paginated, Product, ProductFilter, ProductId,
    ProductSort, RestockPolicy,
};
use crate::error::DomainError;

/// Repository for Customer entities
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Find several customers at once; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError>;

    /// Find a customer by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Create a single customer
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;

    /// Insert all customers in one transaction. Fails without inserting
    /// anything if any row is rejected by the store.
    async fn create_many(&self, batch: &[NewCustomer]) -> Result<Vec<Customer>, DomainError>;

    /// List customers matching a filter
    async fn list(
        &self,
        filter: &CustomerFilter,
        sort: CustomerSort,
        page: Page,
    ) -> Result<Paginated<Customer>, DomainError>;

    /// Total number of customers
    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Find several products at once; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// Create a new product
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// List products matching a filter
    async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Paginated<Product>, DomainError>;

    /// Select every product with `stock < policy.threshold`, add
    /// `policy.increment` to exactly those rows in one bulk update, and
    /// return their post-update state ordered by name.
    ///
    /// Selection, update and refetch happen in a single transaction. Rows
    /// that drop below the threshold after selection are not touched.
    async fn restock_low_stock(&self, policy: &RestockPolicy)
        -> Result<Vec<Product>, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by ID
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Create an order and its product links in one transaction.
    ///
    /// The customer and products are re-read inside the transaction, and the
    /// total is computed from those prices. Returns `DomainError::Validation`
    /// when the customer or any product doesn't exist.
    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError>;

    /// List orders matching a filter
    async fn list(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        page: Page,
    ) -> Result<Paginated<Order>, DomainError>;

    /// Total number of orders
    async fn count(&self) -> Result<u64, DomainError>;

    /// Sum of all order totals (zero when there are no orders)
    async fn total_revenue(&self) -> Result<Decimal, DomainError>;
}

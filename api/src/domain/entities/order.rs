//! Order domain entity
//!
//! An order links one customer to one or more products. Its total is fixed
//! at creation time from the product prices read in the same transaction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, CustomerId};
use super::product::{Product, ProductId};
use crate::error::DomainError;

pub const INVALID_CUSTOMER: &str = "Invalid customer ID.";
pub const EMPTY_PRODUCTS: &str = "At least one product must be selected.";
pub const INVALID_PRODUCTS: &str = "One or more product IDs are invalid.";

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted order
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_ids: Vec<ProductId>,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
}

/// An order with its customer and products resolved
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Option<Customer>,
    pub products: Vec<Product>,
}

/// Data needed to create a new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub product_ids: Vec<ProductId>,
    pub order_date: Option<DateTime<Utc>>,
}

impl NewOrder {
    /// Checks that can run before touching the store
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_ids.is_empty() {
            return Err(DomainError::validation(EMPTY_PRODUCTS));
        }
        let unique: HashSet<_> = self.product_ids.iter().collect();
        if unique.len() != self.product_ids.len() {
            return Err(DomainError::validation(INVALID_PRODUCTS));
        }
        Ok(())
    }

    /// Confirm every requested id was found, then sum their prices
    pub fn total_for(&self, found: &[Product]) -> Result<Decimal, DomainError> {
        let found_ids: HashSet<_> = found.iter().map(|p| p.id).collect();
        if found.len() != self.product_ids.len()
            || !self.product_ids.iter().all(|id| found_ids.contains(id))
        {
            return Err(DomainError::validation(INVALID_PRODUCTS));
        }
        Ok(found.iter().map(|p| p.price).sum())
    }
}

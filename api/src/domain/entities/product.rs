//! Product domain entity
//!
//! Represents a sellable product with a tracked stock level.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Prices are stored as `numeric(10, 2)`
pub const PRICE_SCALE: u32 = 2;
/// Smallest price the column cannot hold
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Always > 0
    pub price: Decimal,
    /// Always >= 0
    pub stock: i32,
}

impl Product {
    /// Whether this product is eligible for a restock under `threshold`
    pub fn is_below(&self, threshold: i32) -> bool {
        self.stock < threshold
    }
}

/// Data needed to create a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Product name is required."));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::validation("Price must be a positive value."));
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(DomainError::validation(
                "Price cannot have more than 2 decimal places.",
            ));
        }
        if self.price >= PRICE_LIMIT {
            return Err(DomainError::validation("Price must be less than 100000000."));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("Stock cannot be negative."));
        }
        Ok(())
    }
}

//! Restock policy and outcome
//!
//! The restock run tops up every product whose stock is strictly below
//! `threshold` by exactly `increment`. It does not bring products *up to*
//! the threshold, so a product can stay eligible across runs when
//! `increment` is smaller than its gap.

use serde::Serialize;

use super::product::Product;
use crate::error::DomainError;

/// Stock level below which a product is eligible
pub const DEFAULT_RESTOCK_THRESHOLD: i32 = 10;

/// Amount added to each eligible product per run
pub const DEFAULT_RESTOCK_INCREMENT: i32 = 10;

pub const NO_LOW_STOCK_MESSAGE: &str = "No low stock products found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestockPolicy {
    pub threshold: i32,
    pub increment: i32,
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RESTOCK_THRESHOLD,
            increment: DEFAULT_RESTOCK_INCREMENT,
        }
    }
}

impl RestockPolicy {
    pub fn new(threshold: i32, increment: i32) -> Result<Self, DomainError> {
        if threshold < 0 {
            return Err(DomainError::validation(
                "Restock threshold cannot be negative.",
            ));
        }
        if increment <= 0 {
            return Err(DomainError::validation(
                "Restock increment must be positive.",
            ));
        }
        Ok(Self {
            threshold,
            increment,
        })
    }
}

/// Result of one restock run
#[derive(Debug, Clone, Serialize)]
pub struct RestockOutcome {
    pub message: String,
    /// Post-update state of exactly the products selected by this run
    pub updated_products: Vec<Product>,
}

impl RestockOutcome {
    pub fn from_updated(updated_products: Vec<Product>) -> Self {
        let message = if updated_products.is_empty() {
            NO_LOW_STOCK_MESSAGE.to_string()
        } else {
            format!(
                "Successfully restocked {} products.",
                updated_products.len()
            )
        };

        Self {
            message,
            updated_products,
        }
    }

    pub fn restocked_count(&self) -> usize {
        self.updated_products.len()
    }
}

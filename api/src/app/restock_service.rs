//! Restock service
//!
//! Entry point for `updateLowStockProducts`. Every product whose stock is
//! below the policy threshold gets exactly `increment` units added in one
//! atomic bulk update. The repository owns the transaction; this service
//! owns the policy and the report.

use std::sync::Arc;

use crate::domain::entities::{RestockOutcome, RestockPolicy};
use crate::domain::ports::ProductRepository;
use crate::error::AppError;

/// Service that tops up under-stocked products
pub struct RestockService<PR>
where
    PR: ProductRepository + ?Sized,
{
    products: Arc<PR>,
    policy: RestockPolicy,
}

impl<PR> RestockService<PR>
where
    PR: ProductRepository + ?Sized,
{
    pub fn new(products: Arc<PR>) -> Self {
        Self {
            products,
            policy: RestockPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RestockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run one restock pass
    ///
    /// The report lists exactly the products selected at the start of the
    /// run, with their stock after the increment.
    pub async fn restock_low_stock(&self) -> Result<RestockOutcome, AppError> {
        let updated = self.products.restock_low_stock(&self.policy).await?;
        let outcome = RestockOutcome::from_updated(updated);

        tracing::info!(
            restocked = outcome.restocked_count(),
            threshold = self.policy.threshold,
            increment = self.policy.increment,
            "{}",
            outcome.message
        );

        Ok(outcome)
    }
}

//! Customer service
//!
//! Handles customer creation (single and bulk) and listing.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::customer::DUPLICATE_EMAIL;
use crate::domain::entities::{
    is_valid_phone, Customer, CustomerFilter, CustomerSort, NewCustomer, Page, Paginated,
};
use crate::domain::ports::CustomerRepository;
use crate::error::AppError;

/// Outcome of a bulk insert: what was stored and what was rejected
#[derive(Debug, Clone, Default)]
pub struct BulkCreateResult {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
}

/// Service for managing customers
pub struct CustomerService<CR>
where
    CR: CustomerRepository + ?Sized,
{
    customers: Arc<CR>,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository + ?Sized,
{
    pub fn new(customers: Arc<CR>) -> Self {
        Self { customers }
    }

    /// Create a single customer
    ///
    /// Fails with a validation error when the phone doesn't match the
    /// accepted pattern or the email is already registered.
    pub async fn create_customer(&self, input: NewCustomer) -> Result<Customer, AppError> {
        input.validate()?;

        if self.customers.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::validation(DUPLICATE_EMAIL));
        }

        let customer = self.customers.create(&input).await?;
        tracing::debug!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Create many customers with per-record validation
    ///
    /// Invalid records are reported individually and skipped. The remaining
    /// records are inserted together in one transaction; if that insert fails
    /// none of them are stored and a single aggregate error is appended.
    pub async fn bulk_create_customers(
        &self,
        inputs: Vec<NewCustomer>,
    ) -> Result<BulkCreateResult, AppError> {
        let mut result = BulkCreateResult::default();
        let mut accepted = Vec::with_capacity(inputs.len());
        let mut seen_emails = HashSet::new();

        for (index, input) in inputs.into_iter().enumerate() {
            let record = index + 1;

            if !input.has_required_fields() {
                result
                    .errors
                    .push(format!("Record {}: Name and email are required.", record));
                continue;
            }
            if input.phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
                result
                    .errors
                    .push(format!("Record {}: Invalid phone number format.", record));
                continue;
            }

            let email = input.email.trim().to_string();
            let taken = seen_emails.contains(&email)
                || self.customers.find_by_email(&email).await?.is_some();
            if taken {
                result.errors.push(format!(
                    "Record {}: Email '{}' already exists.",
                    record, email
                ));
                continue;
            }

            seen_emails.insert(email);
            accepted.push(input);
        }

        if !accepted.is_empty() {
            match self.customers.create_many(&accepted).await {
                Ok(created) => result.customers = created,
                Err(e) => {
                    tracing::warn!(error = %e, "Bulk customer insert rolled back");
                    result.errors.push(format!("Bulk creation failed: {}", e));
                }
            }
        }

        tracing::info!(
            created = result.customers.len(),
            rejected = result.errors.len(),
            "Bulk customer creation finished"
        );
        Ok(result)
    }

    /// List customers matching a filter
    pub async fn list_customers(
        &self,
        filter: &CustomerFilter,
        sort: CustomerSort,
        page: Page,
    ) -> Result<Paginated<Customer>, AppError> {
        Ok(self.customers.list(filter, sort, page).await?)
    }

    /// Total number of customers
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.customers.count().await?)
    }
}

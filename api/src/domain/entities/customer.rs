//! Customer domain entity
//!
//! Represents a customer of the CRM.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Accepted phone formats: optional `+`, optional leading `1`, then 9 to 15 digits
pub const PHONE_PATTERN: &str = r"^\+?1?\d{9,15}$";

pub const DUPLICATE_EMAIL: &str = "A customer with this email already exists.";

/// Unique identifier for a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer record
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Name and email must both be present
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }

    /// Field-level checks that don't need the store
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.has_required_fields() {
            return Err(DomainError::validation("Name and email are required."));
        }
        if let Some(phone) = self.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(DomainError::validation(
                    "Invalid phone number format. Use formats like +1234567890.",
                ));
            }
        }
        Ok(())
    }
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

/// Check a phone number against [`PHONE_PATTERN`]. Empty strings count as absent.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.is_empty() || phone_regex().is_match(phone)
}

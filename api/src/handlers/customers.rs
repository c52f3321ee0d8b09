//! Customer handlers
//!
//! `allCustomers`, `createCustomer` and `bulkCreateCustomers`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::graphql::{Connection, ListArgs};
use crate::domain::entities::{Customer, CustomerFilter, NewCustomer};
use crate::error::AppError;
use crate::AppState;

pub const CUSTOMER_CREATED: &str = "Customer created successfully.";

/// Customer as returned to callers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            email: c.email,
            phone: c.phone,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// `{name, email, phone?}` as sent by callers
#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilterInput {
    pub name_icontains: Option<String>,
    pub email_icontains: Option<String>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lte: Option<DateTime<Utc>>,
    pub phone_pattern: Option<String>,
}

impl From<CustomerFilterInput> for CustomerFilter {
    fn from(f: CustomerFilterInput) -> Self {
        Self {
            name_icontains: f.name_icontains,
            email_icontains: f.email_icontains,
            created_at_gte: f.created_at_gte,
            created_at_lte: f.created_at_lte,
            phone_pattern: f.phone_pattern,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerArgs {
    pub input: CustomerInput,
}

#[derive(Debug, Serialize)]
pub struct CreateCustomerPayload {
    pub customer: CustomerResponse,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateCustomersArgs {
    pub input: Vec<CustomerInput>,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<CustomerResponse>,
    pub errors: Vec<String>,
}

pub async fn all_customers(
    state: &AppState,
    args: ListArgs<CustomerFilterInput>,
) -> Result<Connection<CustomerResponse>, AppError> {
    let sort = args.sort()?;
    let page = args.page();
    let filter: CustomerFilter = args.filter.unwrap_or_default().into();

    let result = state
        .customer_service
        .list_customers(&filter, sort, page)
        .await?;
    Ok(Connection::from_page(result, CustomerResponse::from))
}

pub async fn create_customer(
    state: &AppState,
    args: CreateCustomerArgs,
) -> Result<CreateCustomerPayload, AppError> {
    let customer = state
        .customer_service
        .create_customer(args.input.into())
        .await?;

    Ok(CreateCustomerPayload {
        customer: customer.into(),
        message: CUSTOMER_CREATED,
    })
}

pub async fn bulk_create_customers(
    state: &AppState,
    args: BulkCreateCustomersArgs,
) -> Result<BulkCreateCustomersPayload, AppError> {
    let inputs = args.input.into_iter().map(NewCustomer::from).collect();
    let result = state.customer_service.bulk_create_customers(inputs).await?;

    Ok(BulkCreateCustomersPayload {
        customers: result.customers.into_iter().map(Into::into).collect(),
        errors: result.errors,
    })
}

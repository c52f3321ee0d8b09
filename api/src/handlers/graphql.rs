//! Operation router
//!
//! `POST /graphql` takes `{"operationName": .., "variables": {..}}`. The name
//! is parsed into [`Operation`] and dispatched with a plain `match`; each arm
//! deserializes its own variables and serializes its own result.

use std::str::FromStr;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{customers, orders, products, reports};
use crate::domain::entities::{Page, Paginated, Sort};
use crate::error::AppError;
use crate::AppState;

/// Request body of `POST /graphql`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub operation_name: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

/// Every operation the API knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Hello,
    AllCustomers,
    AllProducts,
    AllOrders,
    TotalCustomerCount,
    TotalOrderCount,
    TotalRevenue,
    CreateCustomer,
    BulkCreateCustomers,
    CreateProduct,
    CreateOrder,
    UpdateLowStockProducts,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hello => "hello",
            Operation::AllCustomers => "allCustomers",
            Operation::AllProducts => "allProducts",
            Operation::AllOrders => "allOrders",
            Operation::TotalCustomerCount => "totalCustomerCount",
            Operation::TotalOrderCount => "totalOrderCount",
            Operation::TotalRevenue => "totalRevenue",
            Operation::CreateCustomer => "createCustomer",
            Operation::BulkCreateCustomers => "bulkCreateCustomers",
            Operation::CreateProduct => "createProduct",
            Operation::CreateOrder => "createOrder",
            Operation::UpdateLowStockProducts => "updateLowStockProducts",
        }
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hello" => Ok(Operation::Hello),
            "allCustomers" => Ok(Operation::AllCustomers),
            "allProducts" => Ok(Operation::AllProducts),
            "allOrders" => Ok(Operation::AllOrders),
            "totalCustomerCount" => Ok(Operation::TotalCustomerCount),
            "totalOrderCount" => Ok(Operation::TotalOrderCount),
            "totalRevenue" => Ok(Operation::TotalRevenue),
            "createCustomer" => Ok(Operation::CreateCustomer),
            "bulkCreateCustomers" => Ok(Operation::BulkCreateCustomers),
            "createProduct" => Ok(Operation::CreateProduct),
            "createOrder" => Ok(Operation::CreateOrder),
            "updateLowStockProducts" => Ok(Operation::UpdateLowStockProducts),
            other => Err(AppError::UnknownOperation(other.to_string())),
        }
    }
}

/// Arguments shared by the `all*` listings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArgs<F> {
    pub filter: Option<F>,
    pub first: Option<u64>,
    pub offset: Option<u64>,
    /// Field name, `-` prefix for descending
    pub order_by: Option<String>,
}

impl<F> ListArgs<F> {
    pub fn page(&self) -> Page {
        Page::new(self.first, self.offset)
    }

    pub fn sort<S>(&self) -> Result<Sort<S>, AppError>
    where
        S: FromStr<Err = String>,
        Sort<S>: Default,
    {
        match self.order_by.as_deref() {
            Some(raw) => raw.parse().map_err(AppError::BadRequest),
            None => Ok(Sort::default()),
        }
    }
}

/// `{items, totalCount}` listing result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Connection<T> {
    pub fn from_page<D>(page: Paginated<D>, f: impl FnMut(D) -> T) -> Self {
        let page = page.map(f);
        Self {
            items: page.items,
            total_count: page.total_count,
        }
    }
}

fn variables<T: DeserializeOwned>(vars: Value) -> Result<T, AppError> {
    serde_json::from_value(vars)
        .map_err(|e| AppError::BadRequest(format!("Invalid variables: {}", e)))
}

fn data<T: Serialize>(value: T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// POST /graphql
///
/// Dispatch one named operation.
pub async fn graphql(
    State(state): State<AppState>,
    payload: Result<Json<OperationRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let operation: Operation = request.operation_name.parse()?;
    let vars = match request.variables {
        Some(Value::Null) | None => Value::Object(Map::new()),
        Some(v) => v,
    };

    tracing::debug!(operation = operation.name(), "Dispatching operation");

    let result = match operation {
        Operation::Hello => data(reports::hello())?,
        Operation::AllCustomers => {
            data(customers::all_customers(&state, variables(vars)?).await?)?
        }
        Operation::AllProducts => data(products::all_products(&state, variables(vars)?).await?)?,
        Operation::AllOrders => data(orders::all_orders(&state, variables(vars)?).await?)?,
        Operation::TotalCustomerCount => data(reports::total_customer_count(&state).await?)?,
        Operation::TotalOrderCount => data(reports::total_order_count(&state).await?)?,
        Operation::TotalRevenue => data(reports::total_revenue(&state).await?)?,
        Operation::CreateCustomer => {
            data(customers::create_customer(&state, variables(vars)?).await?)?
        }
        Operation::BulkCreateCustomers => {
            data(customers::bulk_create_customers(&state, variables(vars)?).await?)?
        }
        Operation::CreateProduct => {
            data(products::create_product(&state, variables(vars)?).await?)?
        }
        Operation::CreateOrder => data(orders::create_order(&state, variables(vars)?).await?)?,
        Operation::UpdateLowStockProducts => {
            data(products::update_low_stock_products(&state).await?)?
        }
    };

    Ok(Json(json!({ "data": { operation.name(): result } })))
}

//! Order handlers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customers::CustomerResponse;
use super::graphql::{Connection, ListArgs};
use super::products::ProductResponse;
use crate::domain::entities::order::{INVALID_CUSTOMER, INVALID_PRODUCTS};
use crate::domain::entities::{CustomerId, NewOrder, OrderDetails, OrderFilter, ProductId};
use crate::error::AppError;
use crate::AppState;

/// Order with its customer and products resolved
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub customer: Option<CustomerResponse>,
    pub products: Vec<ProductResponse>,
    pub order_date: String,
    pub total_amount: Decimal,
}

impl From<OrderDetails> for OrderResponse {
    fn from(d: OrderDetails) -> Self {
        Self {
            id: d.order.id.to_string(),
            customer: d.customer.map(Into::into),
            products: d.products.into_iter().map(Into::into).collect(),
            order_date: d.order.order_date.to_rfc3339(),
            total_amount: d.order.total_amount,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilterInput {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<DateTime<Utc>>,
    pub order_date_lte: Option<DateTime<Utc>>,
    pub customer_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

impl From<OrderFilterInput> for OrderFilter {
    fn from(f: OrderFilterInput) -> Self {
        Self {
            total_amount_gte: f.total_amount_gte,
            total_amount_lte: f.total_amount_lte,
            order_date_gte: f.order_date_gte,
            order_date_lte: f.order_date_lte,
            customer_id: f.customer_id.map(CustomerId),
            product_id: f.product_id.map(ProductId),
        }
    }
}

/// Ids arrive as strings; anything that isn't a UUID can't name a stored row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderArgs {
    pub customer_id: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderPayload {
    pub order: OrderResponse,
}

pub async fn all_orders(
    state: &AppState,
    args: ListArgs<OrderFilterInput>,
) -> Result<Connection<OrderResponse>, AppError> {
    let sort = args.sort()?;
    let page = args.page();
    let filter: OrderFilter = args.filter.unwrap_or_default().into();

    let result = state.order_service.list_orders(&filter, sort, page).await?;
    Ok(Connection::from_page(result, OrderResponse::from))
}

pub async fn create_order(
    state: &AppState,
    args: CreateOrderArgs,
) -> Result<CreateOrderPayload, AppError> {
    let customer_id = Uuid::parse_str(args.customer_id.trim())
        .map(CustomerId)
        .map_err(|_| AppError::validation(INVALID_CUSTOMER))?;
    let product_ids = args
        .product_ids
        .iter()
        .map(|id| Uuid::parse_str(id.trim()).map(ProductId))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| AppError::validation(INVALID_PRODUCTS))?;

    let details = state
        .order_service
        .create_order(NewOrder {
            customer_id,
            product_ids,
            order_date: args.order_date,
        })
        .await?;

    Ok(CreateOrderPayload {
        order: details.into(),
    })
}

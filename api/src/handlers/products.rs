//! Product handlers
//!
//! `allProducts`, `createProduct` and the restock mutation
//! `updateLowStockProducts`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::graphql::{Connection, ListArgs};
use crate::domain::entities::{NewProduct, Product, ProductFilter};
use crate::error::AppError;
use crate::AppState;

/// Product as returned to callers. `price` serializes as a string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilterInput {
    pub name_icontains: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
    /// Only products below the restock threshold
    #[serde(default)]
    pub low_stock: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductArgs {
    #[serde(default)]
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateProductPayload {
    pub product: ProductResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockPayload {
    pub message: String,
    pub updated_products: Vec<ProductResponse>,
}

pub async fn all_products(
    state: &AppState,
    args: ListArgs<ProductFilterInput>,
) -> Result<Connection<ProductResponse>, AppError> {
    let sort = args.sort()?;
    let page = args.page();
    let input = args.filter.unwrap_or_default();
    let low_stock = input.low_stock;
    let filter = ProductFilter {
        name_icontains: input.name_icontains,
        price_gte: input.price_gte,
        price_lte: input.price_lte,
        stock_gte: input.stock_gte,
        stock_lte: input.stock_lte,
        stock_lt: None,
    };

    let result = state
        .product_service
        .list_products(filter, low_stock, sort, page)
        .await?;
    Ok(Connection::from_page(result, ProductResponse::from))
}

pub async fn create_product(
    state: &AppState,
    args: CreateProductArgs,
) -> Result<CreateProductPayload, AppError> {
    let product = state
        .product_service
        .create_product(NewProduct {
            name: args.name,
            description: args.description,
            price: args.price,
            stock: args.stock,
        })
        .await?;

    Ok(CreateProductPayload {
        product: product.into(),
    })
}

pub async fn update_low_stock_products(state: &AppState) -> Result<RestockPayload, AppError> {
    let outcome = state.restock_service.restock_low_stock().await?;

    Ok(RestockPayload {
        message: outcome.message,
        updated_products: outcome
            .updated_products
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}

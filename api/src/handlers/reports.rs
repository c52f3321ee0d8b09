//! Liveness and aggregate queries used by the heartbeat and report jobs

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::AppState;

pub const HELLO: &str = "Hello, GraphQL!";

pub fn hello() -> &'static str {
    HELLO
}

pub async fn total_customer_count(state: &AppState) -> Result<u64, AppError> {
    state.customer_service.count().await
}

pub async fn total_order_count(state: &AppState) -> Result<u64, AppError> {
    state.order_service.count().await
}

pub async fn total_revenue(state: &AppState) -> Result<Decimal, AppError> {
    state.order_service.total_revenue().await
}

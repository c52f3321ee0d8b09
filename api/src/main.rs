//! CRM API Server
//!
//! Customers, products and orders behind a single operation endpoint, with
//! an atomic low-stock restock mutation.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
};
use app::{CustomerService, OrderService, ProductService, RestockService};
use config::Config;
use domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

pub type DynOrderService =
    OrderService<dyn OrderRepository, dyn CustomerRepository, dyn ProductRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<dyn CustomerRepository>>,
    pub product_service: Arc<ProductService<dyn ProductRepository>>,
    pub order_service: Arc<DynOrderService>,
    pub restock_service: Arc<RestockService<dyn ProductRepository>>,
}

impl AppState {
    /// Wire services over any set of repositories
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        config: &Config,
    ) -> Self {
        Self {
            customer_service: Arc::new(CustomerService::new(customers.clone())),
            product_service: Arc::new(ProductService::new(
                products.clone(),
                config.restock.threshold,
            )),
            order_service: Arc::new(OrderService::new(orders, customers, products.clone())),
            restock_service: Arc::new(RestockService::new(products).with_policy(config.restock)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/graphql", post(handlers::graphql))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crm_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CRM API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.init_schema {
        ensure_schema(&db).await.context("Failed to create schema")?;
    }

    let state = AppState::new(
        Arc::new(PostgresCustomerRepository::new(db.clone())),
        Arc::new(PostgresProductRepository::new(db.clone())),
        Arc::new(PostgresOrderRepository::new(db)),
        &config,
    );
    tracing::info!(
        threshold = config.restock.threshold,
        increment = config.restock.increment,
        "Restock policy loaded"
    );

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

//! Order service
//!
//! Order creation and listing. Listings resolve each order's customer and
//! products so callers don't have to issue follow-up lookups.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::order::INVALID_CUSTOMER;
use crate::domain::entities::{
    CustomerId, NewOrder, Order, OrderDetails, OrderFilter, OrderSort, Page, Paginated, ProductId,
};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::{AppError, DomainError};

/// Service for managing orders
pub struct OrderService<OR, CR, PR>
where
    OR: OrderRepository + ?Sized,
    CR: CustomerRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    orders: Arc<OR>,
    customers: Arc<CR>,
    products: Arc<PR>,
}

impl<OR, CR, PR> OrderService<OR, CR, PR>
where
    OR: OrderRepository + ?Sized,
    CR: CustomerRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    pub fn new(orders: Arc<OR>, customers: Arc<CR>, products: Arc<PR>) -> Self {
        Self {
            orders,
            customers,
            products,
        }
    }

    /// Create an order and return it with customer and products resolved
    ///
    /// The total is the sum of the current prices of the selected products.
    /// Nothing is stored when the customer or any product is unknown. The
    /// customer is checked before the product list.
    pub async fn create_order(&self, input: NewOrder) -> Result<OrderDetails, AppError> {
        if self.customers.find_by_id(&input.customer_id).await?.is_none() {
            return Err(DomainError::validation(INVALID_CUSTOMER).into());
        }
        input.validate()?;

        let order = self.orders.create(&input).await?;
        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total = %order.total_amount,
            "Order created"
        );

        let mut details = self.resolve(vec![order]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("Created order could not be resolved".to_string()))
    }

    /// List orders matching a filter, newest first by default
    pub async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        page: Page,
    ) -> Result<Paginated<OrderDetails>, AppError> {
        let result = self.orders.list(filter, sort, page).await?;
        let items = self.resolve(result.items).await?;
        Ok(Paginated {
            items,
            total_count: result.total_count,
        })
    }

    /// Total number of orders
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.orders.count().await?)
    }

    /// Sum of every order's total
    pub async fn total_revenue(&self) -> Result<Decimal, AppError> {
        Ok(self.orders.total_revenue().await?)
    }

    async fn resolve(&self, orders: Vec<Order>) -> Result<Vec<OrderDetails>, AppError> {
        let customer_ids: Vec<CustomerId> = orders
            .iter()
            .map(|o| o.customer_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let product_ids: Vec<ProductId> = orders
            .iter()
            .flat_map(|o| o.product_ids.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let customers: HashMap<_, _> = self
            .customers
            .find_by_ids(&customer_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let products: HashMap<_, _> = self
            .products
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| OrderDetails {
                customer: customers.get(&order.customer_id).cloned(),
                products: order
                    .product_ids
                    .iter()
                    .filter_map(|id| products.get(id).cloned())
                    .collect(),
                order,
            })
            .collect())
    }
}

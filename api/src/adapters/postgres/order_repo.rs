//! PostgreSQL adapter for OrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Query},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    Order as SortOrder, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::order::{INVALID_CUSTOMER, INVALID_PRODUCTS};
use crate::domain::entities::{
    CustomerId, NewOrder, Order, OrderFilter, OrderId, OrderSort, OrderSortField, Page,
    Paginated, Product, ProductId,
};
use crate::domain::ports::OrderRepository;
use crate::entity::{customers, order_products, orders, products};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn condition(filter: &OrderFilter) -> Condition {
    Condition::all()
        .add_option(
            filter
                .total_amount_gte
                .map(|t| orders::Column::TotalAmount.gte(t)),
        )
        .add_option(
            filter
                .total_amount_lte
                .map(|t| orders::Column::TotalAmount.lte(t)),
        )
        .add_option(
            filter
                .order_date_gte
                .map(|d| orders::Column::OrderDate.gte(d.fixed_offset())),
        )
        .add_option(
            filter
                .order_date_lte
                .map(|d| orders::Column::OrderDate.lte(d.fixed_offset())),
        )
        .add_option(filter.customer_id.map(|c| orders::Column::CustomerId.eq(c.0)))
        .add_option(filter.product_id.map(|p| {
            orders::Column::Id.in_subquery(
                Query::select()
                    .column(order_products::Column::OrderId)
                    .from(order_products::Entity)
                    .and_where(order_products::Column::ProductId.eq(p.0))
                    .to_owned(),
            )
        }))
}

fn sort_column(sort: OrderSort) -> (orders::Column, SortOrder) {
    let column = match sort.field {
        OrderSortField::OrderDate => orders::Column::OrderDate,
        OrderSortField::TotalAmount => orders::Column::TotalAmount,
    };
    let order = if sort.descending {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    };
    (column, order)
}

/// Load product links for a set of orders, keyed by order id
async fn links_for<C: ConnectionTrait>(
    conn: &C,
    order_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<ProductId>>, DomainError> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = order_products::Entity::find()
        .filter(order_products::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_products::Column::ProductId)
        .all(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    let mut by_order: HashMap<Uuid, Vec<ProductId>> = HashMap::new();
    for link in links {
        by_order
            .entry(link.order_id)
            .or_default()
            .push(ProductId(link.product_id));
    }
    Ok(by_order)
}

fn to_domain(model: orders::Model, product_ids: Vec<ProductId>) -> Order {
    Order {
        id: OrderId(model.id),
        customer_id: CustomerId(model.customer_id),
        product_ids,
        order_date: model.order_date.with_timezone(&Utc),
        total_amount: model.total_amount,
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let Some(model) = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut links = links_for(&self.db, vec![model.id]).await?;
        let product_ids = links.remove(&model.id).unwrap_or_default();
        Ok(Some(to_domain(model, product_ids)))
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let order = order.clone();

        self.db
            .transaction::<_, Order, DomainError>(move |txn| {
                Box::pin(async move {
                    let customer = customers::Entity::find_by_id(order.customer_id.0)
                        .one(txn)
                        .await?;
                    if customer.is_none() {
                        return Err(DomainError::validation(INVALID_CUSTOMER));
                    }

                    // Share-lock the products so their prices can't change under us
                    let found: Vec<Product> = products::Entity::find()
                        .filter(
                            products::Column::Id.is_in(order.product_ids.iter().map(|id| id.0)),
                        )
                        .lock_shared()
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(Product::from)
                        .collect();

                    if found.len() != order.product_ids.len() {
                        return Err(DomainError::validation(INVALID_PRODUCTS));
                    }
                    let total_amount = order.total_for(&found)?;

                    let saved = orders::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        customer_id: Set(order.customer_id.0),
                        order_date: Set(order.order_date.unwrap_or_else(Utc::now).fixed_offset()),
                        total_amount: Set(total_amount),
                    }
                    .insert(txn)
                    .await?;

                    let links = order.product_ids.iter().map(|product_id| {
                        order_products::ActiveModel {
                            order_id: Set(saved.id),
                            product_id: Set(product_id.0),
                        }
                    });
                    order_products::Entity::insert_many(links).exec(txn).await?;

                    Ok(to_domain(saved, order.product_ids.clone()))
                })
            })
            .await
            .map_err(DomainError::from)
    }

    async fn list(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        page: Page,
    ) -> Result<Paginated<Order>, DomainError> {
        let (column, order) = sort_column(sort);
        let query = orders::Entity::find().filter(condition(filter));

        let total_count = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = query
            .order_by(column, order)
            .order_by_asc(orders::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut links = links_for(&self.db, results.iter().map(|m| m.id).collect()).await?;

        let items = results
            .into_iter()
            .map(|model| {
                let product_ids = links.remove(&model.id).unwrap_or_default();
                to_domain(model, product_ids)
            })
            .collect();

        Ok(Paginated { items, total_count })
    }

    async fn count(&self) -> Result<u64, DomainError> {
        orders::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn total_revenue(&self) -> Result<Decimal, DomainError> {
        // SUM over zero rows is NULL, hence the nested Option
        let result: Option<Option<Decimal>> = orders::Entity::find()
            .select_only()
            .column_as(Expr::col(orders::Column::TotalAmount).sum(), "sum")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.flatten().unwrap_or(Decimal::ZERO))
    }
}

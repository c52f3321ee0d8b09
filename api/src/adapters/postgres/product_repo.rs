//! PostgreSQL adapter for ProductRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::like_pattern;
use crate::domain::entities::{
    NewProduct, Page, Paginated, Product, ProductFilter, ProductId, ProductSort,
    ProductSortField, RestockPolicy,
};
use crate::domain::ports::ProductRepository;
use crate::entity::products;
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn condition(filter: &ProductFilter) -> Condition {
    Condition::all()
        .add_option(filter.name_icontains.as_deref().map(|n| {
            Expr::expr(Func::lower(Expr::col(products::Column::Name))).like(like_pattern(n))
        }))
        .add_option(filter.price_gte.map(|p| products::Column::Price.gte(p)))
        .add_option(filter.price_lte.map(|p| products::Column::Price.lte(p)))
        .add_option(filter.stock_gte.map(|s| products::Column::Stock.gte(s)))
        .add_option(filter.stock_lte.map(|s| products::Column::Stock.lte(s)))
        .add_option(filter.stock_lt.map(|s| products::Column::Stock.lt(s)))
}

fn sort_column(sort: ProductSort) -> (products::Column, Order) {
    let column = match sort.field {
        ProductSortField::Name => products::Column::Name,
        ProductSortField::Price => products::Column::Price,
        ProductSortField::Stock => products::Column::Stock,
    };
    let order = if sort.descending {
        Order::Desc
    } else {
        Order::Asc
    };
    (column, order)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let results = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name.trim().to_string()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            stock: Set(product.stock),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Paginated<Product>, DomainError> {
        let (column, order) = sort_column(sort);
        let query = products::Entity::find().filter(condition(filter));

        let total_count = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = query
            .order_by(column, order)
            .order_by_asc(products::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Paginated {
            items: results.into_iter().map(|m| m.into()).collect(),
            total_count,
        })
    }

    async fn restock_low_stock(
        &self,
        policy: &RestockPolicy,
    ) -> Result<Vec<Product>, DomainError> {
        let policy = *policy;

        let updated = self
            .db
            .transaction::<_, Vec<products::Model>, DomainError>(move |txn| {
                Box::pin(async move {
                    // Lock the selected rows so a concurrent writer can't move them
                    // between the select and the bulk update.
                    let ids: Vec<Uuid> = products::Entity::find()
                        .select_only()
                        .column(products::Column::Id)
                        .filter(products::Column::Stock.lt(policy.threshold))
                        .lock_exclusive()
                        .into_tuple()
                        .all(txn)
                        .await?;

                    if ids.is_empty() {
                        return Ok(vec![]);
                    }

                    // Increment by id, not by re-evaluating the stock predicate
                    products::Entity::update_many()
                        .col_expr(
                            products::Column::Stock,
                            Expr::col(products::Column::Stock).add(policy.increment),
                        )
                        .filter(products::Column::Id.is_in(ids.clone()))
                        .exec(txn)
                        .await?;

                    let refreshed = products::Entity::find()
                        .filter(products::Column::Id.is_in(ids))
                        .order_by_asc(products::Column::Name)
                        .order_by_asc(products::Column::Id)
                        .all(txn)
                        .await?;

                    Ok(refreshed)
                })
            })
            .await?;

        Ok(updated.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: ProductId(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            stock: model.stock,
        }
    }
}

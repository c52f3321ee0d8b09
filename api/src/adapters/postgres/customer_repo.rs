//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::like_pattern;
use crate::domain::entities::customer::DUPLICATE_EMAIL;
use crate::domain::entities::{
    Customer, CustomerFilter, CustomerId, CustomerSort, CustomerSortField, NewCustomer, Page,
    Paginated,
};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// The unique index on `email` is the last line of defence against two
/// concurrent creates with the same address.
fn map_insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::validation(DUPLICATE_EMAIL),
        _ => DomainError::Database(e.to_string()),
    }
}

fn new_row(customer: &NewCustomer) -> customers::Model {
    customers::Model {
        id: Uuid::new_v4(),
        name: customer.name.trim().to_string(),
        email: customer.email.trim().to_string(),
        phone: customer.phone.clone().filter(|p| !p.is_empty()),
        created_at: Utc::now().fixed_offset(),
    }
}

fn active_model(row: customers::Model) -> customers::ActiveModel {
    customers::ActiveModel {
        id: Set(row.id),
        name: Set(row.name),
        email: Set(row.email),
        phone: Set(row.phone),
        created_at: Set(row.created_at),
    }
}

fn condition(filter: &CustomerFilter) -> Condition {
    Condition::all()
        .add_option(filter.name_icontains.as_deref().map(|n| {
            Expr::expr(Func::lower(Expr::col(customers::Column::Name))).like(like_pattern(n))
        }))
        .add_option(filter.email_icontains.as_deref().map(|e| {
            Expr::expr(Func::lower(Expr::col(customers::Column::Email))).like(like_pattern(e))
        }))
        .add_option(
            filter
                .created_at_gte
                .map(|t| customers::Column::CreatedAt.gte(t.fixed_offset())),
        )
        .add_option(
            filter
                .created_at_lte
                .map(|t| customers::Column::CreatedAt.lte(t.fixed_offset())),
        )
        .add_option(
            filter
                .phone_pattern
                .as_deref()
                .map(|p| customers::Column::Phone.starts_with(p)),
        )
}

fn sort_column(sort: CustomerSort) -> (customers::Column, Order) {
    let column = match sort.field {
        CustomerSortField::Name => customers::Column::Name,
        CustomerSortField::Email => customers::Column::Email,
        CustomerSortField::CreatedAt => customers::Column::CreatedAt,
    };
    let order = if sort.descending {
        Order::Desc
    } else {
        Order::Asc
    };
    (column, order)
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let results = customers::Entity::find()
            .filter(customers::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::Email.eq(email.trim()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let result = active_model(new_row(customer))
            .insert(&self.db)
            .await
            .map_err(map_insert_err)?;

        Ok(result.into())
    }

    async fn create_many(&self, batch: &[NewCustomer]) -> Result<Vec<Customer>, DomainError> {
        if batch.is_empty() {
            return Ok(vec![]);
        }

        let rows: Vec<customers::Model> = batch.iter().map(new_row).collect();
        let models: Vec<customers::ActiveModel> = rows.iter().cloned().map(active_model).collect();

        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    customers::Entity::insert_many(models)
                        .exec(txn)
                        .await
                        .map_err(map_insert_err)?;
                    Ok(())
                })
            })
            .await?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list(
        &self,
        filter: &CustomerFilter,
        sort: CustomerSort,
        page: Page,
    ) -> Result<Paginated<Customer>, DomainError> {
        let (column, order) = sort_column(sort);
        let query = customers::Entity::find().filter(condition(filter));

        let total_count = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = query
            .order_by(column, order)
            .order_by_asc(customers::Column::Id)
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

    async fn count(&self) -> Result<u64, DomainError> {
        customers::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Customer {
            id: CustomerId(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

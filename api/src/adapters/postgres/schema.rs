//! Table bootstrap
//!
//! Creates the CRM tables from the SeaORM models when they don't exist yet.
//! Order matters: referenced tables come before the tables pointing at them.

use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{customers, order_products, orders, products};

fn create_table<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned()
}

/// Create any missing CRM tables
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        create_table(&schema, customers::Entity),
        create_table(&schema, products::Entity),
        create_table(&schema, orders::Entity),
        create_table(&schema, order_products::Entity),
    ];

    for statement in &statements {
        db.execute(backend.build(statement)).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}

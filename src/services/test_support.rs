use sea_orm::DatabaseConnection;

use crate::database;
use crate::entities::{seed_catalog, setup_schema};

/// A fresh in-memory store with the schema and the starter catalog.
pub async fn memory_store() -> DatabaseConnection {
    let db = database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    seed_catalog(&db).await.unwrap();
    db
}

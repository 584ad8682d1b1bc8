use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Opens the sea-orm connection pool for `url`.
///
/// An in-memory SQLite database lives only as long as its connection, so such
/// URLs are pinned to exactly one pooled connection.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);

    if url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options).await
}

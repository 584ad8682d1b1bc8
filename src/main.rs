use tracing_subscriber::EnvFilter;

use unifolhas::entities::{seed_catalog, setup_schema};
use unifolhas::{create_api_router, database, AppConfig, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = database::connect(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_catalog(&db).await.expect("Failed to seed the catalog");

    let bind_addr = config.bind_addr;
    let app = create_api_router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(addr = %bind_addr, "Storefront listening");
    axum::serve(listener, app).await.expect("Server error");
}

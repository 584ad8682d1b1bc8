#![allow(dead_code)]

use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};

use unifolhas::entities::{seed_catalog, setup_schema};
use unifolhas::{create_api_router, database, AppConfig, AppState};

/// Starts the storefront on an ephemeral port over a fresh in-memory store
/// and returns its base url.
pub async fn spawn_app() -> String {
    let config = AppConfig::in_memory();
    let db = database::connect(&config.database_url)
        .await
        .expect("Failed to connect to in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_catalog(&db).await.expect("Failed to seed catalog");

    let app = create_api_router(AppState::new(db, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{addr}")
}

/// Opens an anonymous session and returns headers carrying its token.
pub async fn open_session(client: &Client, base: &str) -> header::HeaderMap {
    let response = client
        .post(format!("{base}/api/session"))
        .send()
        .await
        .expect("Failed to send session request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response
        .json::<Value>()
        .await
        .expect("Failed to parse session response JSON");
    let token = body["session"]
        .as_str()
        .expect("Session token not found in response");

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token))
            .expect("Failed to create Authorization header"),
    );
    headers
}

/// Opens a session and logs `username` into it.
pub async fn login(client: &Client, base: &str, username: &str) -> header::HeaderMap {
    let headers = open_session(client, base).await;
    let response = client
        .post(format!("{base}/api/login"))
        .headers(headers.clone())
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::OK);
    headers
}

pub async fn add_to_cart(
    client: &Client,
    base: &str,
    headers: &header::HeaderMap,
    product_name: &str,
    quantity: u32,
) -> Value {
    let response = client
        .post(format!("{base}/api/cart"))
        .headers(headers.clone())
        .json(&json!({ "product_name": product_name, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send add to cart request");
    assert_eq!(response.status(), StatusCode::OK);
    response
        .json::<Value>()
        .await
        .expect("Failed to parse add to cart response JSON")
}

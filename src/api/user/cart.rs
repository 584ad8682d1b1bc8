use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::domain::Cart;
use crate::middleware::logging::{failure, success};
use crate::middleware::session::SessionHandle;
use crate::services::{catalog, checkout};

pub fn cart_router() -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_product))
        .route("/cart/:name", delete(remove_product))
        .route("/checkout", post(checkout_cart))
}

fn cart_body(cart: &Cart) -> serde_json::Value {
    json!({
        "lines": cart.lines(),
        "total": cart.total()
    })
}

async fn get_cart(Extension(handle): Extension<SessionHandle>) -> Response {
    let session = handle.session.lock().await;
    success(StatusCode::OK, cart_body(&session.cart))
}

async fn add_product(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Json(payload): Json<AddProduct>,
) -> Response {
    let mut session = handle.session.lock().await;
    match catalog::add_to_cart(
        &*state.db,
        &mut session,
        &payload.product_name,
        payload.quantity,
    )
    .await
    {
        Ok(line) => success(
            StatusCode::OK,
            json!({
                "line": line,
                "total": session.cart.total()
            }),
        ),
        Err(err) => failure(err),
    }
}

async fn remove_product(
    Path(name): Path<String>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let mut session = handle.session.lock().await;
    // Removing an absent line is not an error.
    catalog::remove_from_cart(&mut session, &name);
    success(StatusCode::OK, cart_body(&session.cart))
}

async fn checkout_cart(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let mut session = handle.session.lock().await;
    match checkout::checkout(&*state.db, &mut session).await {
        Ok(receipt) => success(StatusCode::CREATED, receipt),
        Err(err) => failure(err),
    }
}

#[derive(Deserialize, Debug)]
struct AddProduct {
    product_name: String,
    #[serde(default = "one")]
    quantity: u32,
}

fn one() -> u32 {
    1
}

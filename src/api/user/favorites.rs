use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::domain::FavoriteOutcome;
use crate::middleware::logging::{failure, success};
use crate::middleware::session::SessionHandle;
use crate::services::catalog;

pub fn favorites_router() -> Router {
    Router::new()
        .route("/favorites", get(get_favorites).post(add_favorite))
        .route("/favorites/:name", delete(remove_favorite))
}

async fn get_favorites(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let session = handle.session.lock().await;
    match catalog::favorite_products(&*state.db, &session).await {
        Ok(products) => success(StatusCode::OK, products),
        Err(err) => failure(err),
    }
}

async fn add_favorite(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Json(payload): Json<FavoritePayload>,
) -> Response {
    let mut session = handle.session.lock().await;
    match catalog::add_favorite(&*state.db, &mut session, &payload.product_name).await {
        Ok(outcome) => {
            let status = match outcome {
                FavoriteOutcome::Added => StatusCode::CREATED,
                FavoriteOutcome::AlreadyFavorited => StatusCode::OK,
            };
            success(status, json!({ "status": outcome }))
        }
        Err(err) => failure(err),
    }
}

async fn remove_favorite(
    Path(name): Path<String>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let mut session = handle.session.lock().await;
    match catalog::remove_favorite(&mut session, &name) {
        Ok(removed) => success(StatusCode::OK, json!({ "removed": removed })),
        Err(err) => failure(err),
    }
}

#[derive(Deserialize, Debug)]
struct FavoritePayload {
    product_name: String,
}

use axum::{extract::Extension, http::StatusCode, response::Response, routing::post, Router};
use serde_json::json;

use crate::api::AppState;
use crate::middleware::logging::success;

pub fn session_router() -> Router {
    Router::new().route("/session", post(open_session))
}

/// Hands out an anonymous session token for the `Authorization: Bearer` header.
async fn open_session(Extension(state): Extension<AppState>) -> Response {
    let id = state.sessions.open().await;
    success(StatusCode::CREATED, json!({ "session": id }))
}

use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::middleware::logging::{failure, success};
use crate::middleware::session::SessionHandle;
use crate::services::accounts::{self, Registration};

pub fn account_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/session/close", post(close_session))
}

async fn login(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Json(payload): Json<LoginPayload>,
) -> Response {
    let mut session = handle.session.lock().await;
    match accounts::login(&*state.db, &mut session, &payload.username).await {
        Ok(()) => success(
            StatusCode::OK,
            json!({
                "username": session.user,
                "favorites": session.favorites
            }),
        ),
        Err(err) => failure(err),
    }
}

async fn register(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Json(payload): Json<Registration>,
) -> Response {
    let mut session = handle.session.lock().await;
    match accounts::register(&*state.db, &mut session, payload).await {
        Ok(()) => success(
            StatusCode::CREATED,
            json!({
                "username": session.user,
                "favorites": session.favorites
            }),
        ),
        Err(err) => failure(err),
    }
}

async fn logout(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let mut session = handle.session.lock().await;
    match accounts::logout(&*state.db, &mut session).await {
        Ok(()) => success(StatusCode::OK, json!({ "message": "Logged out" })),
        Err(err) => failure(err),
    }
}

/// Saves favorites like a logout, then forgets the session token.
async fn close_session(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    {
        let mut session = handle.session.lock().await;
        if let Err(err) = accounts::logout(&*state.db, &mut session).await {
            return failure(err);
        }
    }
    state.sessions.close(&handle.id).await;
    success(StatusCode::OK, json!({ "message": "Session closed" }))
}

#[derive(Deserialize, Debug)]
struct LoginPayload {
    username: String,
}

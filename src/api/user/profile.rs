use axum::{extract::Extension, http::StatusCode, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::middleware::logging::{failure, success};
use crate::middleware::session::SessionHandle;
use crate::services::reporting;

pub fn profile_router() -> Router {
    Router::new().route("/profile", get(get_profile))
}

/// Purchase history of the logged-in user.
async fn get_profile(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let session = handle.session.lock().await;
    match reporting::purchase_history(&*state.db, &session).await {
        Ok(history) => success(StatusCode::OK, history),
        Err(err) => failure(err),
    }
}

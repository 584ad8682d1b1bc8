use axum::{extract::Extension, http::StatusCode, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::middleware::logging::{failure, success};
use crate::middleware::session::SessionHandle;
use crate::services::reporting;

pub fn dashboard_router() -> Router {
    Router::new().route("/dashboard", get(get_dashboard))
}

async fn get_dashboard(
    Extension(state): Extension<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    let session = handle.session.lock().await;
    match reporting::dashboard(&*state.db, &session, &state.config.admin_username).await {
        Ok(dashboard) => success(StatusCode::OK, dashboard),
        Err(err) => failure(err),
    }
}

pub mod dashboard;

use axum::{middleware::from_fn_with_state, Router};

use crate::middleware::session::{session_middleware, SessionStore};
use dashboard::dashboard_router;

pub fn admin_api_router(sessions: SessionStore) -> Router {
    Router::new()
        .merge(dashboard_router())
        .route_layer(from_fn_with_state(sessions, session_middleware))
}

pub mod admin;
pub mod public;
pub mod user;

use axum::{middleware, Extension, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::middleware::{logging::logging_middleware, session::SessionStore};

use admin::admin_api_router;
use public::public_api_router;
use user::user_api_router;

/// Shared by every handler through an `Extension` layer.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        AppState {
            db: Arc::new(db),
            sessions: SessionStore::with_idle_timeout(config.session_idle_timeout),
            config: Arc::new(config),
        }
    }
}

pub fn create_api_router(state: AppState) -> Router {
    let api = public_api_router()
        .merge(user_api_router(state.sessions.clone()))
        .nest("/admin", admin_api_router(state.sessions.clone()));

    Router::new()
        .nest("/api", api)
        .layer(Extension(state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

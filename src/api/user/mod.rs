pub mod account;
pub mod cart;
pub mod favorites;
pub mod profile;

use axum::{middleware::from_fn_with_state, Router};

use crate::middleware::session::{session_middleware, SessionStore};
use account::account_router;
use cart::cart_router;
use favorites::favorites_router;
use profile::profile_router;

/// Routes that act on the caller's session.
pub fn user_api_router(sessions: SessionStore) -> Router {
    Router::new()
        .merge(account_router())
        .merge(cart_router())
        .merge(favorites_router())
        .merge(profile_router())
        .route_layer(from_fn_with_state(sessions, session_middleware))
}

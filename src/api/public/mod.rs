pub mod product;
pub mod session;

use axum::Router;

use product::product_router;
use session::session_router;

pub fn public_api_router() -> Router {
    Router::new()
        .merge(product_router())
        .merge(session_router())
}

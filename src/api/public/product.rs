use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::api::AppState;
use crate::domain::CatalogQuery;
use crate::middleware::logging::{failure, success, to_response, ApiError};
use crate::services::catalog;

pub fn product_router() -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/featured", get(get_featured))
        .route("/product/:name", get(get_product))
        .route("/catalog/facets", get(get_facets))
}

async fn get_products(
    Query(query): Query<CatalogQuery>,
    Extension(state): Extension<AppState>,
) -> Response {
    match catalog::browse(&*state.db, &query).await {
        Ok(products) => success(StatusCode::OK, products),
        Err(err) => failure(err),
    }
}

async fn get_featured(Extension(state): Extension<AppState>) -> Response {
    match catalog::featured_products(&*state.db).await {
        Ok(products) => success(StatusCode::OK, products),
        Err(err) => failure(err),
    }
}

async fn get_product(
    Path(name): Path<String>,
    Extension(state): Extension<AppState>,
) -> Response {
    match catalog::find_by_name(&*state.db, &name).await {
        Ok(Some(product)) => success(StatusCode::OK, product),
        Ok(None) => {
            let tmp = format!("No product named '{name}' was found");
            to_response(
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": tmp
                    })),
                ),
                Err(ApiError::Rejected(tmp)),
            )
        }
        Err(err) => failure(err),
    }
}

async fn get_facets(Extension(state): Extension<AppState>) -> Response {
    match catalog::facets(&*state.db).await {
        Ok(facets) => success(StatusCode::OK, facets),
        Err(err) => failure(err),
    }
}

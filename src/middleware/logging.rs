use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::StoreError;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    match response.extensions().get::<Result<(), ApiError>>() {
        Some(Ok(())) => info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
        Some(Err(value)) if status.is_server_error() => error!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Failed to process request"
        ),
        Some(Err(value)) => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Rejected request"
        ),
        None => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request, but no Response extension is set"
        ),
    }

    response
}

/// Outcome attached to every response for the logging middleware.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("Missing or unknown session")]
    SessionMissing,
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Database error: {0}")]
    DbError(String),
}

pub fn to_response<T: IntoResponse>(
    response: T,               //The response that we are sending + StatusCode
    ext: Result<(), ApiError>, //The extension, that we want to give logging middleware
) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(ext);

    response
}

fn status_of(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        StoreError::InvalidRegistration(_)
        | StoreError::InvalidUsername(_)
        | StoreError::InvalidQuantity(_)
        | StoreError::QuantityLimit { .. } => StatusCode::BAD_REQUEST,
        StoreError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::AccessDenied => StatusCode::FORBIDDEN,
        StoreError::CorruptFavorites(_) | StoreError::PersistenceFailure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Turns a failed storefront action into a JSON error response.
pub fn failure(err: StoreError) -> Response {
    let status = status_of(&err);
    let message = err.to_string();
    let ext = if status.is_server_error() {
        ApiError::DbError(message.clone())
    } else {
        ApiError::Rejected(message.clone())
    };

    to_response(
        (
            status,
            Json(json!({
                "error": message
            })),
        ),
        Err(ext),
    )
}

/// Serializes a successful result with `status`.
pub fn success<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    to_response((status, Json(body)), Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(failure(StoreError::NotAuthenticated).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            failure(StoreError::InvalidRegistration("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure(StoreError::ProductNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(failure(StoreError::AccessDenied).status(), StatusCode::FORBIDDEN);
        let response = failure(StoreError::PersistenceFailure(sea_orm::DbErr::Custom(
            "disk full".into(),
        )));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            response.extensions().get::<Result<(), ApiError>>(),
            Some(Err(ApiError::DbError(_)))
        ));
    }
}

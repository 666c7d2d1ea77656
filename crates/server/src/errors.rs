use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy. Only the two auth outcomes carry a
/// structured body; everything else surfaces as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorize Access!")]
    Unauthorized,
    #[error("Forbidden Access!")]
    Forbidden,
    #[error("store operation failed: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("malformed document id: {0}")]
    MalformedId(#[from] mongodb::bson::oid::Error),
    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorize Access!" })),
            )
                .into_response(),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Forbidden Access!" })),
            )
                .into_response(),
            err => {
                error!(error = %err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

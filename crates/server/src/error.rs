//! Unified API error handling.
//!
//! Every route handler returns `Result<T, ApiError>`; failures are
//! converted to structured JSON responses at this boundary and nowhere
//! else. Backend detail goes to the log, never to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use vitrine_core::ValidationError;

use crate::db::StoreError;
use crate::services::CatalogError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed schema validation.
    #[error("validation failed")]
    Validation(ValidationError),

    /// Create would violate slug uniqueness.
    #[error("slug already exists")]
    DuplicateSlug,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage operation failed.
    #[error(transparent)]
    Store(StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(validation) => Self::Validation(validation),
            CatalogError::DuplicateSlug => Self::DuplicateSlug,
            CatalogError::NotFound => Self::NotFound("Product not found".to_owned()),
            CatalogError::Fixture(e) => Self::Internal(e.to_string()),
            CatalogError::Store(e) => Self::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "violations": err.violations,
                }),
            ),
            Self::DuplicateSlug => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Slug already exists"}),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({"error": message})),
            Self::Store(StoreError::Unavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": "Document store unavailable"}),
            ),
            // Sanitised: backend detail is logged, not returned.
            Self::Store(StoreError::Backend(err)) => {
                tracing::error!(error = %err, "storage backend error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

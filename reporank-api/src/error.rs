//! Error types for reporank-api
//!
//! Maps the service taxonomy onto transport status codes. Messages are the
//! fixed, generic strings carried by the taxonomy; nothing from upstream
//! response bodies reaches a caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reporank_common::Error;
use serde_json::json;
use thiserror::Error as ThisError;

/// API error type
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Service-level failure (validation or search)
    #[error("{0}")]
    Service(#[from] Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Service(Error::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Service(err @ Error::UpstreamConnection) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", err.to_string())
            }
            ApiError::Service(err @ Error::UpstreamServer) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", err.to_string())
            }
            ApiError::Service(err @ Error::UpstreamClient) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", err.to_string())
            }
            ApiError::Service(_) | ApiError::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Search operation failed".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

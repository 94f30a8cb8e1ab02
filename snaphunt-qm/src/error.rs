//! Error types for snaphunt-qm
//!
//! All failures are handled at the single request boundary. Client errors
//! carry a human-readable reason; 500-class bodies carry only a generic
//! message, with the full detail (raw provider payload, catalogue size) going
//! to the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::matcher::MatchError;

/// Generic message for failures whose detail stays server-side
const GENERIC_FAILURE_MESSAGE: &str = "Could not process image";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Inference provider unreachable or failing (502)
    #[error("Upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Inference provider broke the structured-output contract (500)
    #[error("Upstream contract violation: {0}")]
    UpstreamContractViolation(String),

    /// Inference provider exceeded its deadline (504)
    #[error("Upstream provider timed out")]
    UpstreamTimeout,

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::PayloadInvalid(reason) => ApiError::BadRequest(reason),
            MatchError::UpstreamUnavailable(detail) => ApiError::UpstreamUnavailable(detail),
            MatchError::UpstreamContractViolation(detail) => {
                ApiError::UpstreamContractViolation(detail)
            }
            MatchError::Timeout => ApiError::UpstreamTimeout,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason),
            ApiError::UpstreamUnavailable(detail) => {
                tracing::error!(detail = %detail, "inference provider unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
            ApiError::UpstreamContractViolation(detail) => {
                tracing::error!(detail = %detail, "inference provider contract violation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_CONTRACT_VIOLATION",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
            ApiError::UpstreamTimeout => {
                tracing::error!("inference provider timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "UPSTREAM_TIMEOUT",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
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

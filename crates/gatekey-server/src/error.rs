//! HTTP error mapping for the token endpoint.
//!
//! Validation errors (malformed caller input) map to `400 { error }`;
//! everything else is fatal for the call and maps to
//! `500 { error, detail }` with the diagnostic detail preserved.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatekey_core::TokenError;
use serde::Serialize;

/// Errors surfaced by the token endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed caller input; recoverable by resubmitting.
    #[error("{0}")]
    Validation(String),

    /// Internal failure (unsupported key length, cipher or serialization
    /// failure).
    #[error("failed to generate token: {detail}")]
    Internal {
        /// Diagnostic detail included in the response body
        detail: String,
    },
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Internal { detail: err.to_string() }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody { error: message, detail: None })
            },
            Self::Internal { detail } => {
                tracing::error!(%detail, "token issuance failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody { error: "failed to generate token".to_string(), detail: Some(detail) },
                )
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience alias for handler results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

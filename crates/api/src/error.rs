use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imgx_core::error::CoreError;
use imgx_relay::RelayError;
use serde_json::json;

use crate::session::SessionError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation errors and [`RelayError`] for provider
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `imgx_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The provider call failed.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The request conflicts with work already in progress.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::Invalid(core) => AppError::Core(core),
            SessionError::Relay(relay) => AppError::Relay(relay),
            SessionError::Busy => AppError::Conflict(message),
            SessionError::NotSubmitted => AppError::InternalError(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UnknownModel(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
            },

            // --- Provider errors ---
            AppError::Relay(relay) => match relay {
                RelayError::GenerationFailed { .. } => {
                    (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", relay.to_string())
                }
                RelayError::Request(err) => {
                    tracing::error!(error = %err, "Image provider unreachable");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "The image provider could not be reached".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

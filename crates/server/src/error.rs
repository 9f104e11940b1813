//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding. All route handlers return `Result<T, AppError>`.
//!
//! Infrastructure failures against the retailer gateway never appear here:
//! they are contained inside the retailer client as empty results and
//! per-item error strings. Only the "nothing meaningful to do" conditions
//! and plain request errors reach this type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::sync::SyncError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Match/sync signaled a caller-distinguishable condition.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// The retailer client has no access token.
    #[error("Retailer is not configured")]
    NotConfigured,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Sync(SyncError::RecipeNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Sync(SyncError::NothingToAdd) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

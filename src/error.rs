//! Error types for the service and for individual API requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Body sent when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Erro inesperado";

/// Process-level errors: startup, configuration and bootstrap.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Database connection or schema bootstrap error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single API operation.
///
/// Each variant maps to exactly one HTTP status; the body is always the
/// message itself as plain text.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A field was missing, had the wrong type or was too short.
    #[error("{0}")]
    Validation(String),

    /// The referenced id does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Any failure reported by the database, passed through verbatim.
    #[error("{0}")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    /// HTTP status for this failure kind.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body: the message, or the generic fallback when there is none.
    pub fn body(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Store(e) => error!(error = %e, "store operation failed"),
            other => warn!(status = status.as_u16(), "request rejected: {}", other),
        }
        (status, self.body()).into_response()
    }
}

/// Convenient Result type alias for process-level code.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type returned by API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

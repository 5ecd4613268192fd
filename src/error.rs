//! Error handling for the summarization service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Declared document type is not one of the supported formats
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A supported format could not be parsed (corrupt, encrypted, unreadable)
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Input text empty after trimming
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Unknown summary style
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Provider-side or transport failure during summarization
    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    /// Storage write failure
    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// Not found (or owned by a different user)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLx database error
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Store internals stay out of response bodies; the log gets the detail.
        let (status, error_code, message) = match &self {
            Error::UnsupportedFormat(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            Error::ExtractionFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                msg.clone(),
            ),
            Error::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "EMPTY_INPUT", msg.clone()),
            Error::InvalidStyle(msg) => (StatusCode::BAD_REQUEST, "INVALID_STYLE", msg.clone()),
            Error::SummarizationFailed(msg) => {
                (StatusCode::BAD_GATEWAY, "SUMMARIZATION_FAILED", msg.clone())
            }
            Error::StoreWrite(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "failed to persist summary".to_string(),
            ),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            Error::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                msg.clone(),
            ),
            Error::Serialization(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                e.to_string(),
            ),
            Error::Http(e) => (StatusCode::BAD_GATEWAY, "HTTP_ERROR", e.to_string()),
            Error::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                e.to_string(),
            ),
            Error::Sqlx(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "database error".to_string(),
            ),
        };

        tracing::error!(
            status = %status,
            error_code = %error_code,
            detail = %self,
            "Request error"
        );

        let body = Json(json!({
            "error_code": error_code,
            "message": message
        }));

        (status, body).into_response()
    }
}

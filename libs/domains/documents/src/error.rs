use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Uploaded file is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Vector index '{0}' does not exist")]
    IndexNotFound(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

impl From<redis::RedisError> for DocumentError {
    fn from(err: redis::RedisError) -> Self {
        DocumentError::Store(err.to_string())
    }
}

impl From<DatabaseError> for DocumentError {
    fn from(err: DatabaseError) -> Self {
        DocumentError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for DocumentError {
    fn from(err: reqwest::Error) -> Self {
        DocumentError::Embedding(err.to_string())
    }
}

impl From<core_config::ConfigError> for DocumentError {
    fn from(err: core_config::ConfigError) -> Self {
        DocumentError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DocumentError {
    fn from(err: tokio::task::JoinError) -> Self {
        DocumentError::Internal(format!("Background task failed: {}", err))
    }
}

/// Convert DocumentError to AppError for standardized HTTP error responses
impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            e @ DocumentError::InvalidUtf8(_) => AppError::BadRequest(e.to_string()),
            DocumentError::Validation(msg) => AppError::BadRequest(msg),
            e @ DocumentError::IndexNotFound(_) => AppError::ServiceUnavailable(e.to_string()),
            e @ DocumentError::DimensionMismatch { .. } => {
                AppError::InternalServerError(e.to_string())
            }
            DocumentError::Store(msg) => {
                AppError::InternalServerError(format!("Store error: {}", msg))
            }
            DocumentError::Embedding(msg) => {
                AppError::InternalServerError(format!("Embedding error: {}", msg))
            }
            DocumentError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
            DocumentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

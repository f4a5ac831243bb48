//! Type-safe error codes for API responses.
//!
//! Each code carries a client-facing identifier (`"BAD_REQUEST"`), an integer
//! for logs and metrics (`1000`), and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::PayloadTooLarge;
//! assert_eq!(code.as_str(), "PAYLOAD_TOO_LARGE");
//! assert_eq!(code.code(), 1006);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Malformed or incomplete request
    BadRequest,

    /// Request body is not valid JSON for the endpoint
    InvalidJson,

    /// Query string could not be decoded
    InvalidQuery,

    /// Multipart body could not be read
    InvalidMultipart,

    /// Requested route or resource does not exist
    NotFound,

    /// Request body exceeds the configured limit
    PayloadTooLarge,

    /// Well-formed request that cannot be processed
    UnprocessableEntity,

    /// HTTP method not allowed on this route
    MethodNotAllowed,

    // Server errors (5000-5999)
    /// Unexpected internal failure
    InternalError,

    /// A dependency the request needs is not ready
    ServiceUnavailable,

    /// JSON serialization failure on the server side
    SerdeJsonError,

    /// File system or socket I/O error
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::NotFound => "NOT_FOUND",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::InvalidJson => 1001,
            Self::InvalidQuery => 1002,
            Self::InvalidMultipart => 1003,
            Self::NotFound => 1004,
            Self::PayloadTooLarge => 1006,
            Self::UnprocessableEntity => 1009,
            Self::MethodNotAllowed => 1010,

            Self::InternalError => 5000,
            Self::ServiceUnavailable => 5003,
            Self::SerdeJsonError => 5010,
            Self::IoError => 5020,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "The request is malformed",
            Self::InvalidJson => "Failed to parse request body",
            Self::InvalidQuery => "Failed to parse query string",
            Self::InvalidMultipart => "Failed to read multipart body",
            Self::NotFound => "The requested resource was not found",
            Self::PayloadTooLarge => "Request body is too large",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::SerdeJsonError => "JSON serialization error",
            Self::IoError => "I/O error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
        assert_eq!(ErrorCode::ServiceUnavailable.as_str(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_error_code_ranges() {
        assert!((1000..2000).contains(&ErrorCode::PayloadTooLarge.code()));
        assert!((5000..6000).contains(&ErrorCode::ServiceUnavailable.code()));
    }

    #[test]
    fn test_error_code_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidMultipart,
            ErrorCode::PayloadTooLarge,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            let back: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }
}

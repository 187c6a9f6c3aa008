//! REST API errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur when talking to the storefront REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: StatusCode,
        /// Human-readable message from the `{ "msg": ... }` payload, if any.
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bearer token could not be read from storage.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The configured base address cannot have path segments appended.
    #[error("API base URL cannot carry a path: {0}")]
    InvalidBase(String),
}

impl ApiError {
    /// The server-supplied message, when the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            Self::Http(_) | Self::Parse(_) | Self::Storage(_) | Self::InvalidBase(_) => None,
        }
    }

    /// HTTP status of a server-reported failure.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) | Self::Storage(_) | Self::InvalidBase(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ApiError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Server returned 400 Bad Request: Email already registered"
        );
        assert_eq!(err.server_message(), Some("Email already registered"));
    }

    #[test]
    fn test_blank_message_is_absent() {
        let err = ApiError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}

//! Unified error handling with Sentry integration.
//!
//! Page workflows gather every module error into [`AppError`]. At the page
//! boundary the error is reported (logged, and captured to Sentry when it is
//! not the user's fault) and turned into a one-line notice with
//! [`AppError::user_message`].

use thiserror::Error;
use tracing::{error, warn};

use crate::api::ApiError;
use crate::cart::CartError;
use crate::config::ConfigError;
use crate::pages::FormError;
use crate::session::SessionError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A REST call failed in transport or was rejected by the server.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A session transition failed; the session has been reset.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The local cart could not be persisted.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Persisted client state could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Form input failed local validation.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Result alias for page workflows.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The message shown to the user.
    ///
    /// Server-reported failures show the server's message when it sent one.
    /// Validation failures describe the offending field. Everything else shows
    /// the page-specific `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(err) => err
                .server_message()
                .map_or_else(|| fallback.to_string(), ToString::to_string),
            Self::Form(err) => err.to_string(),
            Self::Session(_) | Self::Cart(_) | Self::Storage(_) | Self::Config(_) => {
                fallback.to_string()
            }
        }
    }

    /// Whether the failure was caused by the user's input or credentials
    /// rather than by the client or the server.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Api(err) => err.status().is_some_and(|s| s.is_client_error()),
            Self::Form(_) => true,
            Self::Session(SessionError::InvalidToken(_)) => true,
            Self::Session(SessionError::Storage(_))
            | Self::Cart(_)
            | Self::Storage(_)
            | Self::Config(_) => false,
        }
    }

    /// Log the error and capture unexpected failures to Sentry.
    pub fn report(&self, context: &str) {
        if self.is_user_error() {
            warn!(error = %self, context, "Request rejected");
        } else {
            let event_id = sentry::capture_error(self);
            error!(
                error = %self,
                context,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
    }
}

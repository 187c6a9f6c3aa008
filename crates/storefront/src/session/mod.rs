//! Session/auth store.
//!
//! Holds the bearer token and its decoded claims. The store is constructed
//! explicitly (see [`crate::state::AppContext`]) and is the only writer of the
//! persisted token.
//!
//! # Invariant
//!
//! `claims` is present iff `token` is present and decodes to unexpired claims.
//! Every path that meets a token which does not decode (startup restore, login,
//! expiry) ends in [`SessionStore::logout`], which clears both.

mod token;

pub use token::{TokenError, decode_claims};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, instrument, warn};

use shopfront_core::Role;

use crate::models::Claims;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors raised by session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token could not be decoded; the session has been cleared.
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Persisting or clearing the token failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The current authentication state.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    token: Option<SecretString>,
    claims: Option<Claims>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store from whatever token was persisted by a previous run.
    ///
    /// A persisted token that fails to decode, or has expired, is discarded
    /// and the store starts logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the backend cannot be read, or if a
    /// stale token cannot be removed.
    #[instrument(skip(storage))]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let persisted = storage.get(keys::TOKEN)?;
        let mut store = Self {
            storage,
            token: None,
            claims: None,
        };

        if let Some(token) = persisted {
            match validate(&token, Utc::now()) {
                Ok(claims) => {
                    info!(user_id = %claims.user_id, role = %claims.role, "Session restored");
                    store.token = Some(SecretString::from(token));
                    store.claims = Some(claims);
                }
                Err(e) => {
                    warn!(error = %e, "Discarding persisted token");
                    store.logout()?;
                }
            }
        }

        Ok(store)
    }

    /// Replace the session with a freshly issued token.
    ///
    /// The token is decoded before anything is written. If decoding fails the
    /// session is logged out, so no token is left persisted without claims.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidToken` when the token does not decode or
    /// has expired, and `SessionError::Storage` when persisting fails. Either
    /// way the session ends up logged out.
    #[instrument(skip(self, token))]
    pub fn login(&mut self, token: &str) -> Result<&Claims, SessionError> {
        let claims = match validate(token, Utc::now()) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Rejecting issued token");
                self.logout()?;
                return Err(e.into());
            }
        };

        if let Err(e) = self.storage.set(keys::TOKEN, token) {
            // Storage may still hold the previous user's token.
            if let Err(cleanup) = self.logout() {
                warn!(error = %cleanup, "Failed to clear previous token");
            }
            return Err(e.into());
        }

        info!(user_id = %claims.user_id, role = %claims.role, "Logged in");
        self.token = Some(SecretString::from(token.to_owned()));
        Ok(self.claims.insert(claims))
    }

    /// Clear the token and claims, in memory and in storage.
    ///
    /// Memory is cleared even if the storage write fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the persisted token cannot be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let was_authenticated = self.token.is_some();
        self.token = None;
        self.claims = None;
        self.storage.remove(keys::TOKEN)?;
        if was_authenticated {
            info!("Logged out");
        }
        Ok(())
    }

    /// Log out if the claims carry an expiry at or before `now`.
    ///
    /// Returns `true` when the session was ended.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the persisted token cannot be removed.
    pub fn enforce_expiry(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        if self.claims.as_ref().is_some_and(|c| c.is_expired_at(now)) {
            info!("Session expired");
            self.logout()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether the decoded claims carry the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some(Role::Admin))
    }

    /// Role of the current user, if logged in.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.claims.as_ref().map(|c| c.role)
    }

    /// Decoded claims of the current user.
    #[must_use]
    pub const fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// The raw bearer token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

/// Decode a token and reject it if already expired.
fn validate(token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let claims = decode_claims(token)?;
    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

//! Authentication endpoints.

use tracing::instrument;

use super::{ApiClient, ApiError};
use crate::models::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};

impl ApiClient {
    /// Register a new account (`POST /auth/signup`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the signup.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest<'_>) -> Result<MessageResponse, ApiError> {
        self.post_ack(&["auth", "signup"], request).await
    }

    /// Exchange credentials for a bearer token (`POST /auth/login`).
    ///
    /// The token is returned, not stored; the session store decides whether to
    /// keep it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ApiError> {
        self.post(&["auth", "login"], request).await
    }
}

//! Authentication request and response bodies (`/auth/*`).

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/signup`.
#[derive(Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for SignupRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /auth/login`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Generic `{ "msg": ... }` acknowledgement or error payload.
///
/// Some error bodies carry `message` or `error` instead, or alongside `msg`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageResponse {
    /// The most specific message present: `msg`, then `message`, then `error`.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefers_msg() {
        let body: MessageResponse =
            serde_json::from_str(r#"{"msg":"Out of stock","error":"Bad Request"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Out of stock"));

        let body: MessageResponse =
            serde_json::from_str(r#"{"error":"Bad Request","message":"Token expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Token expired"));

        let body: MessageResponse = serde_json::from_str(r#"{"error":"Bad Request"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad Request"));
    }

    #[test]
    fn test_message_absent() {
        let body: MessageResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let request = LoginRequest {
            email: "ada@example.com",
            password: "hunter2",
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("ada@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}

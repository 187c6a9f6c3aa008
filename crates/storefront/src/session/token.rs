//! Bearer token decoding.
//!
//! Tokens are JWTs (`header.payload.signature`). Only the payload is read;
//! signature verification is the server's job.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

use crate::models::Claims;

/// Reasons a token could not be decoded into [`Claims`].
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token does not have three dot-separated segments.
    #[error("token is not a JWT: expected 3 segments, found {0}")]
    Malformed(usize),

    /// The payload segment is not valid base64url.
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not a JSON claims object.
    #[error("token payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The token decoded but has already expired.
    #[error("token expired")]
    Expired,
}

/// Decode the claims carried in a bearer token.
///
/// # Errors
///
/// Returns a [`TokenError`] when the token is not a well-formed JWT with a
/// JSON claims payload. Expiry is not checked here.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(TokenError::Malformed(segments.len()));
    };

    // Tolerate padded segments
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use shopfront_core::Role;

    /// Build an unsigned token around a JSON payload.
    pub(crate) fn token_for(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decodes_payload() {
        let token = token_for(&serde_json::json!({
            "id": "u1", "name": "Ada", "role": "admin", "exp": 4_102_444_800_i64
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id.as_str(), "u1");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.display_name(), "Ada");
        assert!(claims.exp.is_some());
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let token = token_for(&serde_json::json!({"userId": "u2"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.display_name(), "u2");
    }

    #[test]
    fn test_accepts_id_under_several_keys() {
        let token = token_for(&serde_json::json!({
            "id": "u1", "sub": "auth0|u1", "role": "admin"
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id.as_str(), "u1");
        assert_eq!(claims.role, Role::Admin);

        let token = token_for(&serde_json::json!({"userId": "u2", "sub": "s2"}));
        assert_eq!(decode_claims(&token).unwrap().user_id.as_str(), "u2");

        let token = token_for(&serde_json::json!({"sub": "s3", "exp": 4_102_444_800_i64}));
        assert_eq!(decode_claims(&token).unwrap().user_id.as_str(), "s3");
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!(matches!(decode_claims("abc"), Err(TokenError::Malformed(1))));
        assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Malformed(4))));
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Base64(_))));

        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Json(_))));

        let no_id = token_for(&serde_json::json!({"role": "admin"}));
        assert!(matches!(decode_claims(&no_id), Err(TokenError::Json(_))));
    }
}

//! Identity claims carried in the bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{Role, UserId};

/// Decoded identity of the logged-in user.
///
/// This is the JSON payload segment of the bearer token. The client never
/// verifies the signature; the server does that on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    /// User's ID, taken from `id`, then `userId`, then `sub`.
    #[serde(rename = "id")]
    pub user_id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address, when the server embeds it.
    #[serde(default)]
    pub email: Option<String>,
    /// Role claim; absent means customer.
    #[serde(default)]
    pub role: Role,
    /// Expiry.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub exp: Option<DateTime<Utc>>,
    /// Issued-at.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub iat: Option<DateTime<Utc>>,
}

/// Payload as sent; the user ID may appear under several keys at once.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default, rename = "userId")]
    user_id: Option<UserId>,
    #[serde(default)]
    sub: Option<UserId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Role,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    exp: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    iat: Option<DateTime<Utc>>,
}

/// The payload names no user ID under any known key.
#[derive(Debug, thiserror::Error)]
#[error("missing field `id`")]
struct MissingUserId;

impl TryFrom<RawClaims> for Claims {
    type Error = MissingUserId;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let user_id = raw.id.or(raw.user_id).or(raw.sub).ok_or(MissingUserId)?;
        Ok(Self {
            user_id,
            name: raw.name,
            email: raw.email,
            role: raw.role,
            exp: raw.exp,
            iat: raw.iat,
        })
    }
}

impl Claims {
    /// Whether the token has expired at `now`. Tokens without `exp` never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    /// Name shown in the navigation bar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

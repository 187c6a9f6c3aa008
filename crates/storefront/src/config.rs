//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_ENV` - `production` or `development` (default: `development`
//!   in debug builds, `production` in release builds)
//! - `SHOPFRONT_ORIGIN` - Origin the production `/api` path is resolved
//!   against (required when `SHOPFRONT_ENV=production` and no override is set)
//! - `SHOPFRONT_API_URL` - Absolute API base URL, overrides the mode default
//! - `SHOPFRONT_DATA_DIR` - Directory for persisted client state (default: `.shopfront`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// API base used by development builds.
pub const DEVELOPMENT_API_BASE: &str = "http://localhost:5001/api";

/// API path used by production builds, relative to the site origin.
pub const PRODUCTION_API_PATH: &str = "/api";

const DEFAULT_DATA_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment mode, which selects the API base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Talks to the API on the same origin under `/api`.
    Production,
    /// Talks to a local API server on port 5001.
    Development,
}

impl DeploymentMode {
    /// The mode implied by the build profile.
    #[must_use]
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("expected production or development, got '{other}'")),
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Deployment mode the base URL was derived from
    pub mode: DeploymentMode,
    /// Absolute API base URL without a trailing slash
    pub api_base: Url,
    /// Directory holding persisted client state (token, local cart)
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, or if production mode
    /// has neither an origin nor an explicit API URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mode = match get_optional_env("SHOPFRONT_ENV") {
            Some(raw) => raw
                .parse::<DeploymentMode>()
                .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_ENV".to_string(), e))?,
            None => DeploymentMode::from_build(),
        };

        let api_base = match get_optional_env("SHOPFRONT_API_URL") {
            Some(raw) => parse_base_url("SHOPFRONT_API_URL", &raw)?,
            None => resolve_api_base(mode, get_optional_env("SHOPFRONT_ORIGIN").as_deref())?,
        };

        let data_dir = PathBuf::from(get_env_or_default("SHOPFRONT_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            mode,
            api_base,
            data_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Build a configuration pointing at an explicit API base.
    ///
    /// Used by tests and embedders that do not read the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_base` is not an absolute URL.
    pub fn with_api_base(api_base: &str, data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            mode: DeploymentMode::Development,
            api_base: parse_base_url("api_base", api_base)?,
            data_dir: data_dir.into(),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }
}

/// Pick the API base for a deployment mode.
///
/// Development always uses the local server. Production resolves the
/// relative `/api` path against the site origin.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` in production mode without an origin.
pub fn resolve_api_base(mode: DeploymentMode, origin: Option<&str>) -> Result<Url, ConfigError> {
    match mode {
        DeploymentMode::Development => parse_base_url("SHOPFRONT_API_URL", DEVELOPMENT_API_BASE),
        DeploymentMode::Production => {
            let origin =
                origin.ok_or_else(|| ConfigError::MissingEnvVar("SHOPFRONT_ORIGIN".to_string()))?;
            let origin = Url::parse(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_ORIGIN".to_string(), e.to_string())
            })?;
            let joined = origin.join(PRODUCTION_API_PATH).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_ORIGIN".to_string(), e.to_string())
            })?;
            Ok(joined)
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an absolute base URL, dropping any trailing slash.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("production".parse::<DeploymentMode>(), Ok(DeploymentMode::Production));
        assert_eq!(" Dev ".parse::<DeploymentMode>(), Ok(DeploymentMode::Development));
        assert!("staging".parse::<DeploymentMode>().is_err());
    }

    #[test]
    fn test_development_base_is_local() {
        let url = resolve_api_base(DeploymentMode::Development, Some("https://ignored.example")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api");
    }

    #[test]
    fn test_production_base_is_relative_to_origin() {
        let url = resolve_api_base(DeploymentMode::Production, Some("https://shop.example.com/some/page"))
            .unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api");
    }

    #[test]
    fn test_production_requires_origin() {
        let err = resolve_api_base(DeploymentMode::Production, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SHOPFRONT_ORIGIN"));
    }

    #[test]
    fn test_with_api_base_trims_trailing_slash() {
        let config = StorefrontConfig::with_api_base("http://127.0.0.1:9000/api/", "/tmp/x").unwrap();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_with_api_base_rejects_relative() {
        assert!(StorefrontConfig::with_api_base("/api", "/tmp/x").is_err());
    }
}

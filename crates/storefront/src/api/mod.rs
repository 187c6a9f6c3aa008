//! HTTP client adapter for the storefront REST API.
//!
//! Every request goes to the configured base address with a JSON content
//! type. Before dispatch the bearer token is read from storage and attached as
//! `Authorization: Bearer <token>` when present, so a login or logout is
//! picked up by the very next request.
//!
//! Non-success responses become [`ApiError::Server`] carrying the `msg`
//! (or `message`, or `error`) field of the error payload. There is no retry, backoff or timeout: failures are
//! surfaced to the caller immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::api::ApiClient;
//!
//! let api = ApiClient::new(&config.api_base, storage.clone())?;
//! let products = api.list_products().await?;
//! ```

mod auth;
mod cart;
mod error;
mod orders;
mod products;

pub use error::ApiError;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::models::MessageResponse;
use crate::storage::{KeyValueStore, keys};

/// Client for the storefront REST API.
///
/// Cheaply cloneable; clones share the connection pool and storage handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base: Url,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built, or
    /// `ApiError::InvalidBase` if `api_base` cannot carry a path.
    pub fn new(api_base: &Url, storage: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let mut base = api_base.clone();
        base.path_segments_mut()
            .map_err(|()| ApiError::InvalidBase(api_base.to_string()))?
            .pop_if_empty();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base,
                storage,
            }),
        })
    }

    /// The base address requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base.as_str()
    }

    /// Absolute URL for an API path given as segments, e.g. `["products", id]`.
    /// Each segment is percent-encoded, so an ID can never add path components
    /// or a query.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBase(self.inner.base.to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Start a request, attaching the persisted bearer token if one exists.
    fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder, ApiError> {
        let builder = self.inner.client.request(method, self.url(path)?);
        match self.inner.storage.get(keys::TOKEN)? {
            Some(token) if !token.is_empty() => Ok(builder.bearer_auth(token)),
            _ => Ok(builder),
        }
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&body)
                .ok()
                .and_then(MessageResponse::into_message);
            warn!(
                status = %status,
                path = %url,
                message = message.as_deref().unwrap_or(""),
                "API returned non-success status"
            );
            return Err(ApiError::Server { status, message });
        }

        debug!(status = %status, path = %url, "API request succeeded");
        Ok(body)
    }

    /// Send a request and decode a JSON response body.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request whose response body carries nothing the client needs.
    async fn acknowledge(&self, builder: RequestBuilder) -> Result<MessageResponse, ApiError> {
        let body = self.execute(builder).await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, path)?).await
    }

    pub(crate) async fn post<B, T>(&self, path: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::POST, path)?.json(body)).await
    }

    pub(crate) async fn post_ack<B>(&self, path: &[&str], body: &B) -> Result<MessageResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.acknowledge(self.request(Method::POST, path)?.json(body))
            .await
    }

    pub(crate) async fn put_ack<B>(&self, path: &[&str], body: &B) -> Result<MessageResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.acknowledge(self.request(Method::PUT, path)?.json(body))
            .await
    }

    pub(crate) async fn delete_ack(&self, path: &[&str]) -> Result<MessageResponse, ApiError> {
        self.acknowledge(self.request(Method::DELETE, path)?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&Url::parse(base).unwrap(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_trailing_slash_dropped_from_base() {
        let api = client("http://localhost:5001/api/");
        assert_eq!(api.base_url(), "http://localhost:5001/api");
        assert_eq!(
            api.url(&["products"]).unwrap().as_str(),
            "http://localhost:5001/api/products"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let api = client("http://localhost:5001/api");
        let url = api.url(&["products", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/products/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_rejects_base_without_path() {
        let base = Url::parse("mailto:shop@example.com").unwrap();
        let err = ApiClient::new(&base, Arc::new(MemoryStore::new())).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBase(_)));
    }
}

//! Application context owned by the front end.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::api::ApiClient;
use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::guards::{self, Route};
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore};

/// Everything a page workflow needs: configuration, the persisted stores and
/// the API client.
///
/// The context is built once at startup and passed explicitly. Session and
/// cart are mutated only through `&mut AppContext`.
#[derive(Debug)]
pub struct AppContext {
    config: StorefrontConfig,
    api: ApiClient,
    session: SessionStore,
    cart: CartStore,
}

impl AppContext {
    /// Build a context over an explicit storage backend.
    ///
    /// Restores the persisted session (discarding an undecodable or expired
    /// token) and the persisted local cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the HTTP client cannot be
    /// built.
    pub fn new(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let api = ApiClient::new(&config.api_base, Arc::clone(&storage))?;
        let session = SessionStore::restore(Arc::clone(&storage))?;
        let cart = CartStore::load(storage)?;

        info!(
            api_base = %config.api_base,
            authenticated = session.is_authenticated(),
            cart_items = cart.item_count(),
            "Storefront context ready"
        );

        Ok(Self {
            config,
            api,
            session,
            cart,
        })
    }

    /// Build a context persisting state to files under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// See [`AppContext::new`].
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));
        Self::new(config, storage)
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The REST API client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// The local (optimistic) cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Log out if the session token has expired.
    ///
    /// Returns `true` when the session was ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the expired token cannot be removed from storage.
    pub fn expire_session(&mut self) -> Result<bool> {
        Ok(self.session.enforce_expiry(Utc::now())?)
    }

    /// Navigate to a route, returning the route the guards allow.
    ///
    /// # Errors
    ///
    /// Returns an error if an expired token cannot be removed from storage.
    pub fn navigate(&mut self, route: Route) -> Result<Route> {
        Ok(guards::navigate(route, &mut self.session, Utc::now())?)
    }
}

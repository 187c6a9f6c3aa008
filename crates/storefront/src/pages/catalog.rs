//! Product catalog page (`/products`, `/dashboard`).

use tracing::{debug, info, instrument};

use shopfront_core::ProductId;

use super::{Notifier, fail};
use crate::cart::CartAction;
use crate::catalog::CatalogFilter;
use crate::error::Result;
use crate::models::Product;
use crate::state::AppContext;

pub const FETCH_FAILED: &str = "Failed to fetch products. Please try again later.";
pub const ADDED_TO_CART: &str = "Added to cart!";
pub const ADD_TO_CART_FAILED: &str = "Failed to add to cart";

/// The fetched catalog and the filter applied to it.
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    products: Vec<Product>,
    filter: CatalogFilter,
}

impl CatalogPage {
    /// Build the page over an already fetched product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            filter: CatalogFilter::new(),
        }
    }

    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the user.
    #[instrument(skip(ctx, notifier))]
    pub async fn load(ctx: &AppContext, notifier: &dyn Notifier) -> Result<Self> {
        let products = ctx
            .api()
            .list_products()
            .await
            .map_err(|e| fail(notifier, e, "catalog", FETCH_FAILED))?;
        debug!(count = products.len(), "Catalog loaded");
        Ok(Self::new(products))
    }

    /// Every fetched product, unfiltered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Mutable filter; the visible list is recomputed on every call to
    /// [`CatalogPage::visible`].
    pub const fn filter_mut(&mut self) -> &mut CatalogFilter {
        &mut self.filter
    }

    /// Products passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Add one unit of a product to the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the user.
    #[instrument(skip(ctx, notifier), fields(product_id = %id))]
    pub async fn add_to_cart(
        ctx: &AppContext,
        id: &ProductId,
        notifier: &dyn Notifier,
    ) -> Result<()> {
        ctx.api()
            .add_to_cart(id, 1)
            .await
            .map_err(|e| fail(notifier, e, "add to cart", ADD_TO_CART_FAILED))?;
        info!("Added to server cart");
        notifier.notify(ADDED_TO_CART);
        Ok(())
    }

    /// Add a product to the local cart.
    ///
    /// # Errors
    ///
    /// Returns the persistence error after notifying the user.
    pub fn add_to_local_cart(
        ctx: &mut AppContext,
        product: &Product,
        notifier: &dyn Notifier,
    ) -> Result<()> {
        ctx.cart_mut()
            .dispatch(CartAction::AddItem(product.clone()))
            .map_err(|e| fail(notifier, e, "local cart", ADD_TO_CART_FAILED))?;
        notifier.notify(ADDED_TO_CART);
        Ok(())
    }
}

//! Admin catalog management page (`/admin`).

use tracing::{info, instrument, warn};

use shopfront_core::ProductId;

use super::{Notifier, ProductForm, fail};
use crate::error::Result;
use crate::models::Product;
use crate::state::AppContext;

pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this product?";
pub const DELETED: &str = "Product deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const UPDATED: &str = "Product updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update product";

/// Product list with at most one product being edited inline.
#[derive(Debug, Clone, Default)]
pub struct AdminPage {
    products: Vec<Product>,
    editing: Option<(ProductId, ProductForm)>,
}

impl AdminPage {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            editing: None,
        }
    }

    /// Fetch the catalog. A failed fetch is logged and yields an empty list.
    #[instrument(skip(ctx))]
    pub async fn load(ctx: &AppContext) -> Self {
        let mut page = Self::default();
        page.refresh(ctx).await;
        page
    }

    /// Refetch the catalog, keeping the current list if the fetch fails.
    pub async fn refresh(&mut self, ctx: &AppContext) {
        match ctx.api().list_products().await {
            Ok(products) => self.products = products,
            Err(e) => warn!(error = %e, "Failed to fetch products"),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Delete a product after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; no request is made.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the user; the list is unchanged.
    #[instrument(skip(self, ctx, notifier), fields(product_id = %id))]
    pub async fn delete(
        &mut self,
        ctx: &AppContext,
        id: &ProductId,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        if !notifier.confirm(CONFIRM_DELETE) {
            return Ok(false);
        }

        ctx.api()
            .delete_product(id)
            .await
            .map_err(|e| fail(notifier, e, "delete product", DELETE_FAILED))?;

        self.products.retain(|p| &p.id != id);
        info!("Product deleted");
        notifier.notify(DELETED);
        Ok(true)
    }

    /// Start editing a product, prefilling the form from its current fields.
    ///
    /// Returns `None` if the product is not in the list.
    pub fn begin_edit(&mut self, id: &ProductId) -> Option<&mut ProductForm> {
        let product = self.products.iter().find(|p| &p.id == id)?;
        let form = ProductForm::from_product(product);
        let (_, form) = self.editing.insert((id.clone(), form));
        Some(form)
    }

    /// The product being edited and its form.
    #[must_use]
    pub fn editing(&self) -> Option<(&ProductId, &ProductForm)> {
        self.editing.as_ref().map(|(id, form)| (id, form))
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ProductForm> {
        self.editing.as_mut().map(|(_, form)| form)
    }

    /// Abandon the edit and reset the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the edit: `PUT` the parsed form, then refetch the catalog.
    ///
    /// Returns `Ok(false)` when nothing is being edited.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after notifying the user; the edit
    /// stays open.
    #[instrument(skip(self, ctx, notifier))]
    pub async fn submit_edit(&mut self, ctx: &AppContext, notifier: &dyn Notifier) -> Result<bool> {
        let Some((id, form)) = &self.editing else {
            return Ok(false);
        };

        let input = form
            .to_input()
            .map_err(|e| fail(notifier, e, "update product", UPDATE_FAILED))?;
        ctx.api()
            .update_product(id, &input)
            .await
            .map_err(|e| fail(notifier, e, "update product", UPDATE_FAILED))?;

        info!(product_id = %id, "Product updated");
        self.editing = None;
        self.refresh(ctx).await;
        notifier.notify(UPDATED);
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopfront_core::Price;

    fn page() -> AdminPage {
        AdminPage::new(vec![Product {
            id: ProductId::new("p1"),
            name: "Mug".to_string(),
            price: Price::from_cents(1200).unwrap(),
            description: Some("Stoneware".to_string()),
            stock_quantity: 4,
        }])
    }

    #[test]
    fn test_begin_edit_prefills() {
        let mut page = page();
        let form = page.begin_edit(&ProductId::new("p1")).unwrap();
        assert_eq!(form.name, "Mug");
        assert_eq!(form.description, "Stoneware");
        assert_eq!(form.stock_quantity, "4");

        form.name = "Big Mug".to_string();
        let (id, form) = page.editing().unwrap();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(form.name, "Big Mug");
    }

    #[test]
    fn test_begin_edit_unknown_product() {
        let mut page = page();
        assert!(page.begin_edit(&ProductId::new("nope")).is_none());
        assert!(page.editing().is_none());
    }

    #[test]
    fn test_cancel_edit() {
        let mut page = page();
        page.begin_edit(&ProductId::new("p1"));
        page.cancel_edit();
        assert!(page.editing().is_none());
        assert!(page.edit_form_mut().is_none());
    }
}

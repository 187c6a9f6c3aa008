//! Add-product page (`/admin/add-product`).

use tracing::{info, instrument};

use super::{Notifier, ProductForm, fail};
use crate::error::Result;
use crate::guards::Route;
use crate::state::AppContext;

pub const ADDED: &str = "Product added successfully!";
pub const ADD_FAILED: &str = "Failed to add product";

/// The new-product form.
#[derive(Debug, Clone, Default)]
pub struct AddProductPage {
    pub form: ProductForm,
}

impl AddProductPage {
    #[must_use]
    pub const fn new(form: ProductForm) -> Self {
        Self { form }
    }

    /// Create the product and return to the admin catalog.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after notifying the user; the form
    /// keeps its contents.
    #[instrument(skip(self, ctx, notifier), fields(name = %self.form.name))]
    pub async fn submit(&self, ctx: &AppContext, notifier: &dyn Notifier) -> Result<Route> {
        let input = self
            .form
            .to_input()
            .map_err(|e| fail(notifier, e, "add product", ADD_FAILED))?;
        ctx.api()
            .create_product(&input)
            .await
            .map_err(|e| fail(notifier, e, "add product", ADD_FAILED))?;

        info!("Product added");
        notifier.notify(ADDED);
        Ok(Route::Admin)
    }
}

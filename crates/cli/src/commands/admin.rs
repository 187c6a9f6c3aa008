//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront admin list
//! shopfront admin add -n "Espresso Cups" -d "Set of two" -p 25 -s 12
//! shopfront admin edit 650a1b2c3d4e5f6a7b8c9d0e --price 22.50
//! shopfront admin delete 650a1b2c3d4e5f6a7b8c9d0e
//! ```

use shopfront_core::ProductId;
use shopfront_storefront::pages::{AddProductPage, AdminPage, Notifier, ProductForm};
use shopfront_storefront::{AppContext, Route};

use super::{CliError, enter};

/// Fields to overwrite when editing; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock_quantity: Option<String>,
}

impl ProductChanges {
    fn apply_to(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(stock) = self.stock_quantity {
            form.stock_quantity = stock;
        }
    }
}

#[allow(clippy::print_stdout)]
pub async fn list(ctx: &mut AppContext) -> Result<(), CliError> {
    enter(ctx, Route::Admin)?;

    let page = AdminPage::load(ctx).await;
    for product in page.products() {
        println!(
            "{:<26} {:<32} {:>10}  stock {}",
            product.id, product.name, product.price, product.stock_quantity
        );
    }
    Ok(())
}

pub async fn add(
    ctx: &mut AppContext,
    form: ProductForm,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::AdminAddProduct)?;
    AddProductPage::new(form).submit(ctx, notifier).await?;
    Ok(())
}

pub async fn edit(
    ctx: &mut AppContext,
    product_id: &str,
    changes: ProductChanges,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Admin)?;

    let id = ProductId::new(product_id);
    let mut page = AdminPage::load(ctx).await;
    let form = page
        .begin_edit(&id)
        .ok_or_else(|| CliError::UnknownProduct(product_id.to_string()))?;
    changes.apply_to(form);

    page.submit_edit(ctx, notifier).await?;
    Ok(())
}

pub async fn delete(
    ctx: &mut AppContext,
    product_id: &str,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Admin)?;

    let mut page = AdminPage::load(ctx).await;
    page.delete(ctx, &ProductId::new(product_id), notifier).await?;
    Ok(())
}

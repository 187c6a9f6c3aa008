//! Shopping commands: catalog, carts, checkout and order history.

use shopfront_core::ProductId;
use shopfront_storefront::cart::{CartAction, CartActionKind};
use shopfront_storefront::pages::{CatalogPage, CheckoutPage, FormError, Notifier, OrdersPage};
use shopfront_storefront::{AppContext, AppError, Route};

use super::{CliError, enter};

fn form_error(err: impl Into<FormError>) -> CliError {
    CliError::App(AppError::Form(err.into()))
}

#[allow(clippy::print_stdout)]
pub async fn products(
    ctx: &mut AppContext,
    search: &str,
    min: &str,
    max: &str,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Products)?;

    let mut page = CatalogPage::load(ctx, notifier).await?;
    let filter = page.filter_mut();
    filter.set_search(search);
    filter.set_min_price(min).map_err(form_error)?;
    filter.set_max_price(max).map_err(form_error)?;

    let visible = page.visible();
    if visible.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    for product in visible {
        println!(
            "{:<26} {:<32} {:>10}  stock {}",
            product.id, product.name, product.price, product.stock_quantity
        );
        if let Some(description) = product.description() {
            println!("{:<26} {description}", "");
        }
    }
    Ok(())
}

pub async fn add_to_cart(
    ctx: &mut AppContext,
    product_id: &str,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Products)?;
    CatalogPage::add_to_cart(ctx, &ProductId::new(product_id), notifier).await?;
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn cart(ctx: &mut AppContext, notifier: &dyn Notifier) -> Result<(), CliError> {
    enter(ctx, Route::Cart)?;

    let page = CheckoutPage::load(ctx, notifier).await?;
    if page.cart().is_empty() {
        println!("Your cart is empty. Start shopping to add items!");
        return Ok(());
    }
    for item in &page.cart().items {
        println!(
            "{:<32} {:>10} x {:<4} {:>10}",
            item.product.name,
            item.product.price,
            item.quantity,
            item.line_total()
        );
    }
    println!("Total: {}", page.total());
    Ok(())
}

pub async fn checkout(
    ctx: &mut AppContext,
    address: String,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Cart)?;

    let mut page = CheckoutPage::load(ctx, notifier).await?;
    page.set_address(address);
    page.place_order(ctx, notifier).await?;
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn orders(ctx: &mut AppContext, notifier: &dyn Notifier) -> Result<(), CliError> {
    enter(ctx, Route::Orders)?;

    let page = OrdersPage::load(ctx, notifier).await?;
    if page.is_empty() {
        println!("You have no orders yet.");
        return Ok(());
    }
    for order in page.orders() {
        println!("{}", shopfront_storefront::pages::orders::summary(order));
        println!("  Delivery address: {}", order.delivery_address);
        for line in &order.products {
            println!(
                "  {} x {} ({})",
                line.name(),
                line.quantity,
                line.line_total()
            );
        }
    }
    Ok(())
}

/// Show the local cart, or apply a named action to it.
#[allow(clippy::print_stdout)]
pub async fn local_cart(
    ctx: &mut AppContext,
    action: Option<&str>,
    product_id: Option<String>,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    enter(ctx, Route::Cart)?;

    if let Some(name) = action {
        let kind: CartActionKind = name.parse()?;
        let id = match (kind.needs_product(), product_id) {
            (true, Some(id)) => Some(ProductId::new(id)),
            (true, None) => return Err(CliError::MissingProductId(name.to_string())),
            (false, _) => None,
        };

        match (kind, id) {
            (CartActionKind::Add, Some(id)) => {
                let catalog = CatalogPage::load(ctx, notifier).await?;
                let product = catalog
                    .find(&id)
                    .ok_or_else(|| CliError::UnknownProduct(id.to_string()))?;
                CatalogPage::add_to_local_cart(ctx, product, notifier)?;
            }
            (CartActionKind::Remove, Some(id)) => apply(ctx, CartAction::RemoveItem(id))?,
            (CartActionKind::Increase, Some(id)) => apply(ctx, CartAction::IncreaseQuantity(id))?,
            (CartActionKind::Decrease, Some(id)) => apply(ctx, CartAction::DecreaseQuantity(id))?,
            (CartActionKind::Clear, _) => apply(ctx, CartAction::Clear)?,
            (_, None) => return Err(CliError::MissingProductId(name.to_string())),
        }
    }

    let cart = ctx.cart();
    if cart.is_empty() {
        println!("Local cart is empty.");
        return Ok(());
    }
    for item in cart.items() {
        println!(
            "{:<26} {:<32} x {:<4} {:>10}",
            item.id(),
            item.product.name,
            item.quantity,
            item.line_total()
        );
    }
    println!("{} item(s), total {}", cart.item_count(), cart.total());
    Ok(())
}

fn apply(ctx: &mut AppContext, action: CartAction) -> Result<(), CliError> {
    ctx.cart_mut().dispatch(action).map_err(AppError::from)?;
    Ok(())
}

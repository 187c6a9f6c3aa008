//! Cart and checkout page (`/cart`).

use tracing::{info, instrument, warn};

use super::{FormError, Notifier, fail};
use crate::error::Result;
use crate::models::{NewOrder, NewOrderLine, ServerCart};
use crate::state::AppContext;

use shopfront_core::Price;

pub const LOAD_FAILED: &str = "Failed to load cart";
pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const ORDER_FAILED: &str = "Failed to place order";

/// The server-confirmed cart and the delivery address being typed.
#[derive(Debug, Clone, Default)]
pub struct CheckoutPage {
    cart: ServerCart,
    address: String,
}

impl CheckoutPage {
    #[must_use]
    pub fn new(cart: ServerCart) -> Self {
        Self {
            cart,
            address: String::new(),
        }
    }

    /// Fetch the server cart.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the user.
    #[instrument(skip(ctx, notifier))]
    pub async fn load(ctx: &AppContext, notifier: &dyn Notifier) -> Result<Self> {
        let cart = ctx
            .api()
            .get_cart()
            .await
            .map_err(|e| fail(notifier, e, "cart", LOAD_FAILED))?;
        Ok(Self::new(cart))
    }

    #[must_use]
    pub const fn cart(&self) -> &ServerCart {
        &self.cart
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    /// Sum of price times quantity over the cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// The order that would be placed, after validating address and cart.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingAddress` for a blank address and
    /// `FormError::EmptyCart` when there is nothing to order.
    pub fn order(&self) -> std::result::Result<NewOrder, FormError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(FormError::MissingAddress);
        }
        if self.cart.is_empty() {
            return Err(FormError::EmptyCart);
        }
        Ok(NewOrder {
            products: self
                .cart
                .items
                .iter()
                .map(|item| NewOrderLine {
                    product: item.product.id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            delivery_address: address.to_string(),
        })
    }

    /// Place an order for the whole cart.
    ///
    /// Issues one `POST /orders` followed by one `DELETE /cart`. Only when both
    /// succeed are the displayed cart, the address and the local cart reset.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after notifying the user; the page
    /// is left as it was.
    #[instrument(skip(self, ctx, notifier), fields(lines = self.cart.items.len()))]
    pub async fn place_order(&mut self, ctx: &mut AppContext, notifier: &dyn Notifier) -> Result<()> {
        let order = self
            .order()
            .map_err(|e| fail(notifier, e, "checkout", ORDER_FAILED))?;

        ctx.api()
            .place_order(&order)
            .await
            .map_err(|e| fail(notifier, e, "checkout", ORDER_FAILED))?;
        ctx.api()
            .clear_cart()
            .await
            .map_err(|e| fail(notifier, e, "checkout", ORDER_FAILED))?;

        self.cart = ServerCart::default();
        self.address.clear();
        if let Err(e) = ctx.cart_mut().clear() {
            warn!(error = %e, "Order placed but local cart could not be cleared");
        }

        info!(lines = order.products.len(), "Order placed");
        notifier.notify(ORDER_PLACED);
        Ok(())
    }
}

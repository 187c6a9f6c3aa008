//! Local (optimistic) cart.
//!
//! An ordered list of products the shopper has picked, kept on the client and
//! written to storage after every transition. It is independent of the
//! server-side cart that checkout reads from `/cart`.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use shopfront_core::{Price, ProductId};

use crate::models::Product;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors raised while persisting the cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A cart entry: the product as it was when added, plus a quantity ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// The product ID this entry is keyed by.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Transitions of the local cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Insert with quantity 1, or increment if the product is already present.
    AddItem(Product),
    /// Drop the entry. Absent IDs are ignored.
    RemoveItem(ProductId),
    IncreaseQuantity(ProductId),
    /// Decrement, never below 1. Use `RemoveItem` to drop an entry.
    DecreaseQuantity(ProductId),
    Clear,
}

/// Name of a cart action, as typed by a user or read from a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartActionKind {
    Add,
    Remove,
    Increase,
    Decrease,
    Clear,
}

/// An action name that does not correspond to any cart transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cart action '{0}' (expected add, remove, increase, decrease or clear)")]
pub struct UnknownAction(pub String);

impl FromStr for CartActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "add_item" => Ok(Self::Add),
            "remove" | "remove_item" => Ok(Self::Remove),
            "increase" | "increase_quantity" => Ok(Self::Increase),
            "decrease" | "decrease_quantity" => Ok(Self::Decrease),
            "clear" | "clear_cart" => Ok(Self::Clear),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

impl CartActionKind {
    /// Whether the action targets a single product.
    #[must_use]
    pub const fn needs_product(self) -> bool {
        !matches!(self, Self::Clear)
    }
}

/// Apply one action to a cart, returning the new cart.
#[must_use]
pub fn reduce(mut items: Vec<CartItem>, action: CartAction) -> Vec<CartItem> {
    match action {
        CartAction::AddItem(product) => {
            match items.iter_mut().find(|item| item.product.id == product.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
                None => items.push(CartItem {
                    product,
                    quantity: 1,
                }),
            }
            items
        }
        CartAction::RemoveItem(id) => {
            items.retain(|item| item.product.id != id);
            items
        }
        CartAction::IncreaseQuantity(id) => {
            for item in items.iter_mut().filter(|item| item.product.id == id) {
                item.quantity = item.quantity.saturating_add(1);
            }
            items
        }
        CartAction::DecreaseQuantity(id) => {
            for item in items.iter_mut().filter(|item| item.product.id == id) {
                item.quantity = item.quantity.saturating_sub(1).max(1);
            }
            items
        }
        CartAction::Clear => Vec::new(),
    }
}

/// The local cart bound to its storage.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<CartItem>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart persisted by a previous run.
    ///
    /// A persisted value that is not a valid cart is discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be read.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let items = match storage.get(keys::CART)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable persisted cart");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { storage, items })
    }

    /// Apply an action and persist the resulting cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the new cart cannot be written. The in-memory
    /// cart has already moved to the new state in that case.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        debug!(?action, "Cart action");
        let items = std::mem::take(&mut self.items);
        self.items = reduce(items, action);
        self.persist()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the empty cart cannot be written.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.dispatch(CartAction::Clear)
    }

    /// Current entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn persist(&self) -> Result<(), CartError> {
        let raw = serde_json::to_string(&self.items)?;
        self.storage.set(keys::CART, &raw)?;
        Ok(())
    }
}

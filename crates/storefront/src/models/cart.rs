//! Server-side cart types (`/cart`).

use serde::{Deserialize, Serialize};

use shopfront_core::{Price, ProductId};

use super::product::Product;

/// The server-confirmed cart, fetched fresh for each view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCart {
    #[serde(default)]
    pub items: Vec<ServerCartItem>,
}

/// A cart line with its product populated by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCartItem {
    #[serde(rename = "productId")]
    pub product: Product,
    pub quantity: u32,
}

impl ServerCartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

impl ServerCart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(ServerCartItem::line_total).sum()
    }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_of_populated_cart() {
        let cart: ServerCart = serde_json::from_value(json!({
            "_id": "c1",
            "user": "u1",
            "items": [
                {"productId": {"_id": "a", "name": "A", "price": 2.5}, "quantity": 2},
                {"productId": {"_id": "b", "name": "B", "price": 10}, "quantity": 1}
            ]
        }))
        .unwrap();

        assert_eq!(cart.total(), Price::from_cents(1500).unwrap());
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_missing_items_is_empty_cart() {
        let cart: ServerCart = serde_json::from_value(json!({})).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}

//! Order types (`/orders`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{OrderId, OrderStatus, Price, ProductId};

/// A placed order as returned by `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub products: Vec<OrderLine>,
}

impl Order {
    /// Sum of line totals. Lines whose product is no longer populated count as zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.products.iter().map(OrderLine::line_total).sum()
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default, alias = "productId")]
    pub product: Option<ProductRef>,
    pub quantity: u32,
}

impl OrderLine {
    /// Product name, or a generic label when the product is not populated.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.product {
            Some(ProductRef::Summary(summary)) => summary.name.as_deref().unwrap_or("Product"),
            Some(ProductRef::Id(_)) | None => "Product",
        }
    }

    /// Unit price, zero when unknown.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        match &self.product {
            Some(ProductRef::Summary(summary)) => summary.price.unwrap_or(Price::ZERO),
            Some(ProductRef::Id(_)) | None => Price::ZERO,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price() * self.quantity
    }
}

/// A product reference inside an order: populated by the server, or a bare ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Summary(ProductSummary),
    Id(ProductId),
}

/// The populated subset of a product the order history needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub products: Vec<NewOrderLine>,
    pub delivery_address: String,
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderLine {
    pub product: ProductId,
    pub quantity: u32,
}

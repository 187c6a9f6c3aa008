//! Catalog product types.

use serde::{Deserialize, Serialize};

use shopfront_core::{Price, ProductId};

/// A product as served by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned product ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock_quantity: u32,
}

impl Product {
    /// The description, treating an empty string as absent.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub stock_quantity: u32,
}

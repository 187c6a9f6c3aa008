//! Client-side catalog filtering.
//!
//! The catalog is filtered locally on every change of the search term or
//! price bounds. Nothing is sent to the server.
//!
//! Bounds are plain decimals rather than prices: a negative minimum is
//! accepted and lets everything through, a negative maximum matches nothing.

use std::str::FromStr;

use rust_decimal::Decimal;
use shopfront_core::{Price, PriceError};

use crate::models::Product;

/// Search term and inclusive price bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    search: String,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl CatalogFilter {
    /// A filter that matches every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term. Matching is case-insensitive.
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        self.set_search(term);
        self
    }

    #[must_use]
    pub fn with_min_price(mut self, min: Option<Price>) -> Self {
        self.min_price = min.map(|p| p.amount());
        self
    }

    #[must_use]
    pub fn with_max_price(mut self, max: Option<Price>) -> Self {
        self.max_price = max.map(|p| p.amount());
        self
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    /// Set the lower bound from form input; blank input clears it.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` when the input is not a number. The previous
    /// bound is kept in that case.
    pub fn set_min_price(&mut self, input: &str) -> Result<(), PriceError> {
        self.min_price = parse_bound(input)?;
        Ok(())
    }

    /// Set the upper bound from form input; blank input clears it.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` when the input is not a number. The previous
    /// bound is kept in that case.
    pub fn set_max_price(&mut self, input: &str) -> Result<(), PriceError> {
        self.max_price = parse_bound(input)?;
        Ok(())
    }

    /// Whether the filter lets every product through.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_empty() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Name or description contains the search term.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&self.search)
            || product
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&self.search))
    }

    /// Price is at or above the lower bound.
    #[must_use]
    pub fn matches_min(&self, product: &Product) -> bool {
        self.min_price.is_none_or(|min| product.price.amount() >= min)
    }

    /// Price is at or below the upper bound.
    #[must_use]
    pub fn matches_max(&self, product: &Product) -> bool {
        self.max_price.is_none_or(|max| product.price.amount() <= max)
    }

    /// Conjunction of the three predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_min(product) && self.matches_max(product)
    }

    /// The matching products, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

fn parse_bound(input: &str) -> Result<Option<Decimal>, PriceError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(input)
        .map(Some)
        .map_err(|_| PriceError::Invalid(input.to_owned()))
}

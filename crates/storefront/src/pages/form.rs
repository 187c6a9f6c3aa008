//! Form input and its local validation.

use std::str::FromStr;

use thiserror::Error;

use shopfront_core::{EmailError, Price, PriceError};

use crate::models::{Product, ProductInput};

/// A form field failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address ({0})")]
    InvalidEmail(#[from] EmailError),

    #[error("Price must be a non-negative number ({0})")]
    InvalidPrice(#[from] PriceError),

    #[error("Stock quantity must be a whole number, got '{0}'")]
    InvalidStock(String),

    #[error("Please enter a delivery address")]
    MissingAddress,

    #[error("Your cart is empty")]
    EmptyCart,
}

/// Reject blank input for a required field.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

/// Product fields as typed into the add or edit form.
///
/// Price and stock stay text until submit, when they are parsed as a decimal
/// and an integer respectively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
}

impl ProductForm {
    /// A form prefilled from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.amount().to_string(),
            stock_quantity: product.stock_quantity.to_string(),
        }
    }

    /// Validate the form into a request body.
    ///
    /// # Errors
    ///
    /// Returns a `FormError` naming the first field that is missing or does
    /// not parse.
    pub fn to_input(&self) -> Result<ProductInput, FormError> {
        let name = required("Name", &self.name)?;
        let price = Price::from_str(required("Price", &self.price)?)?;
        let stock = required("Stock quantity", &self.stock_quantity)?;
        let stock_quantity = stock
            .parse::<u32>()
            .map_err(|_| FormError::InvalidStock(stock.to_string()))?;

        Ok(ProductInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            stock_quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopfront_core::ProductId;

    fn form(name: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: "  Hand thrown  ".to_string(),
            price: price.to_string(),
            stock_quantity: stock.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let input = form(" Mug ", "12.50", "7").to_input().unwrap();
        assert_eq!(input.name, "Mug");
        assert_eq!(input.description, "Hand thrown");
        assert_eq!(input.price, Price::from_cents(1250).unwrap());
        assert_eq!(input.stock_quantity, 7);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(form("", "1", "1").to_input(), Err(FormError::Required("Name")));
        assert_eq!(form("Mug", " ", "1").to_input(), Err(FormError::Required("Price")));
        assert_eq!(
            form("Mug", "1", "").to_input(),
            Err(FormError::Required("Stock quantity"))
        );
    }

    #[test]
    fn test_unparseable_numbers() {
        assert!(matches!(
            form("Mug", "abc", "1").to_input(),
            Err(FormError::InvalidPrice(_))
        ));
        assert!(matches!(
            form("Mug", "-1", "1").to_input(),
            Err(FormError::InvalidPrice(PriceError::Negative))
        ));
        assert_eq!(
            form("Mug", "1", "2.5").to_input(),
            Err(FormError::InvalidStock("2.5".to_string()))
        );
    }

    #[test]
    fn test_prefill_from_product() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Mug".to_string(),
            price: Price::from_cents(999).unwrap(),
            description: None,
            stock_quantity: 3,
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "9.99");
        assert_eq!(form.description, "");
        assert_eq!(form.to_input().unwrap().stock_quantity, 3);
    }
}

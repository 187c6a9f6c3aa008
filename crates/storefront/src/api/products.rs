//! Product catalog endpoints.

use tracing::instrument;

use shopfront_core::ProductId;

use super::{ApiClient, ApiError};
use crate::models::{MessageResponse, Product, ProductInput};

impl ApiClient {
    /// List every product (`GET /products`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(&["products"]).await
    }

    /// Create a product (`POST /products`). Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the input.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<MessageResponse, ApiError> {
        self.post_ack(&["products"], input).await
    }

    /// Replace a product's editable fields (`PUT /products/:id`). Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the input.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<MessageResponse, ApiError> {
        self.put_ack(&["products", id.as_str()], input).await
    }

    /// Delete a product (`DELETE /products/:id`). Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product cannot be deleted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<MessageResponse, ApiError> {
        self.delete_ack(&["products", id.as_str()]).await
    }
}

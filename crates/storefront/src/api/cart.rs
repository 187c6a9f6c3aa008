//! Server-side cart endpoints.

use tracing::instrument;

use shopfront_core::ProductId;

use super::{ApiClient, ApiError};
use crate::models::{AddToCartRequest, MessageResponse, ServerCart};

impl ApiClient {
    /// Fetch the current user's cart (`GET /cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a cart.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<ServerCart, ApiError> {
        self.get(&["cart"]).await
    }

    /// Add units of a product to the cart (`POST /cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the item.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<MessageResponse, ApiError> {
        let body = AddToCartRequest {
            product_id: product_id.clone(),
            quantity,
        };
        self.post_ack(&["cart"], &body).await
    }

    /// Empty the cart (`DELETE /cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<MessageResponse, ApiError> {
        self.delete_ack(&["cart"]).await
    }
}

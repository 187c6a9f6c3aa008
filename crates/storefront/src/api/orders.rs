//! Order endpoints.

use tracing::instrument;

use super::{ApiClient, ApiError};
use crate::models::{MessageResponse, NewOrder, Order};

impl ApiClient {
    /// Place an order (`POST /orders`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the order.
    #[instrument(skip(self, order), fields(lines = order.products.len()))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<MessageResponse, ApiError> {
        self.post_ack(&["orders"], order).await
    }

    /// List the current user's orders (`GET /orders`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an order list.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get(&["orders"]).await
    }
}

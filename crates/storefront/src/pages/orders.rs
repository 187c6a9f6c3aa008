//! Order history page (`/orders`).

use tracing::{debug, instrument};

use super::{Notifier, fail};
use crate::error::Result;
use crate::models::Order;
use crate::state::AppContext;

pub const FETCH_FAILED: &str = "Failed to fetch orders";

/// The current user's orders, newest as served by the API.
#[derive(Debug, Clone, Default)]
pub struct OrdersPage {
    orders: Vec<Order>,
}

impl OrdersPage {
    #[must_use]
    pub const fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Fetch the order history.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the user.
    #[instrument(skip(ctx, notifier))]
    pub async fn load(ctx: &AppContext, notifier: &dyn Notifier) -> Result<Self> {
        let orders = ctx
            .api()
            .list_orders()
            .await
            .map_err(|e| fail(notifier, e, "orders", FETCH_FAILED))?;
        debug!(count = orders.len(), "Orders loaded");
        Ok(Self::new(orders))
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// One summary line per order: short ID, date, status and total.
    #[must_use]
    pub fn summaries(&self) -> Vec<String> {
        self.orders.iter().map(summary).collect()
    }
}

/// `Order #<short id> | <date> | <status> | <total>`.
#[must_use]
pub fn summary(order: &Order) -> String {
    let placed = order
        .created_at
        .map_or_else(|| "unknown date".to_string(), |at| at.format("%Y-%m-%d").to_string());
    format!(
        "Order #{} | {placed} | {} | {}",
        order.id.short(),
        order.status,
        order.total()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_line() {
        let order: Order = serde_json::from_value(json!({
            "_id": "650a1b2c3d4e5f6a7b8c9d0e",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "status": "shipped",
            "deliveryAddress": "1 Main St",
            "products": [
                {"product": {"_id": "p1", "name": "Mug", "price": 4.5}, "quantity": 2},
                {"product": "p2", "quantity": 1}
            ]
        }))
        .unwrap();

        assert_eq!(summary(&order), "Order #8c9d0e | 2024-03-01 | Shipped | $9.00");
    }

    #[test]
    fn test_summary_without_date() {
        let order: Order =
            serde_json::from_value(json!({"_id": "abc", "status": "pending"})).unwrap();
        assert_eq!(summary(&order), "Order #abc | unknown date | Pending | $0.00");
    }
}

//! Order service
//!
//! Handles order submission: the order is stored and each lesson's inventory
//! debited as one unit.

use std::sync::Arc;

use crate::domain::entities::{NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::error::AppError;

/// Service for placing orders
pub struct OrderService<OR>
where
    OR: OrderRepository,
{
    orders: Arc<OR>,
}

impl<OR> OrderService<OR>
where
    OR: OrderRepository,
{
    pub fn new(orders: Arc<OR>) -> Self {
        Self { orders }
    }

    /// Place an order
    ///
    /// Every line debits its lesson by the requested quantity. If any lesson
    /// is missing or short of seats, nothing is stored and no inventory moves.
    pub async fn place_order(&self, order: NewOrder) -> Result<Order, AppError> {
        let placed = self.orders.place(&order).await.map_err(|e| {
            tracing::warn!(error = %e, lines = order.lines.len(), "Order rejected");
            e
        })?;

        tracing::info!(
            order_id = %placed.id,
            lines = placed.lines.len(),
            spaces = placed.number_of_spaces,
            "Order placed"
        );

        Ok(placed)
    }
}

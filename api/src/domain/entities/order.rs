//! Order domain entity
//!
//! An order reserves seats across one or more lessons. Orders are
//! write-once: they are created at submission time and never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lesson::LessonId;
use crate::error::DomainError;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of an order: a number of seats on a single lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub lesson_id: LessonId,
    pub quantity: i32,
}

/// A placed order
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub phone_number: String,
    pub lines: Vec<OrderLine>,
    /// Sum of all line quantities
    pub number_of_spaces: i32,
    pub created_at: DateTime<Utc>,
}

/// Data needed to place a new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub phone_number: String,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    /// Total seats requested across all lines
    ///
    /// Fails when the order has no lines, a line requests a non-positive
    /// quantity, or the sum overflows.
    pub fn total_quantity(&self) -> Result<i32, DomainError> {
        if self.lines.is_empty() {
            return Err(DomainError::Validation(
                "Order must contain at least one lesson".to_string(),
            ));
        }

        self.lines.iter().try_fold(0i32, |total, line| {
            if line.quantity <= 0 {
                return Err(DomainError::Validation(format!(
                    "Quantity for lesson {} must be positive",
                    line.lesson_id
                )));
            }
            total
                .checked_add(line.quantity)
                .ok_or_else(|| DomainError::Validation("Order quantity too large".to_string()))
        })
    }
}

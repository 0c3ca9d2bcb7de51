//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Lesson, LessonId, NewOrder, Order};
use crate::domain::ledger::{InventoryAdjustment, InventoryLevel};
use crate::error::DomainError;

/// Repository for Lesson entities and their inventory
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// List every lesson, ordered by title
    async fn find_all(&self) -> Result<Vec<Lesson>, DomainError>;

    /// Lessons whose title or location contains `term`, ignoring case
    async fn search(&self, term: &str) -> Result<Vec<Lesson>, DomainError>;

    /// Find a lesson by ID
    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError>;

    /// Apply a consolidated batch of inventory adjustments
    ///
    /// All-or-nothing: if any adjustment is rejected, no lesson changes.
    /// Each adjustment must be atomic against concurrent writers of the
    /// same lesson.
    async fn adjust_inventory(
        &self,
        adjustments: &[InventoryAdjustment],
    ) -> Result<Vec<InventoryLevel>, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and debit each ordered lesson in one transaction
    ///
    /// The debits are derived from the order's lines with
    /// `ledger::debits_for`. Either the order is stored and every debit
    /// committed, or nothing is.
    async fn place(&self, order: &NewOrder) -> Result<Order, DomainError>;
}

//! Catalog service
//!
//! Lesson listing, keyword search and direct inventory adjustments.

use std::sync::Arc;

use crate::domain::entities::{Lesson, LessonId};
use crate::domain::ledger::{self, InventoryAdjustment, InventoryLevel};
use crate::domain::ports::LessonRepository;
use crate::error::{AppError, DomainError};

/// Service for browsing lessons and correcting their inventory
pub struct CatalogService<LR>
where
    LR: LessonRepository,
{
    lessons: Arc<LR>,
}

impl<LR> CatalogService<LR>
where
    LR: LessonRepository,
{
    pub fn new(lessons: Arc<LR>) -> Self {
        Self { lessons }
    }

    /// List all lessons
    ///
    /// An empty catalog is reported as not found rather than an empty list.
    pub async fn list_lessons(&self) -> Result<Vec<Lesson>, AppError> {
        let lessons = self.lessons.find_all().await?;

        if lessons.is_empty() {
            return Err(AppError::Domain(DomainError::NotFound(
                "No lessons found.".to_string(),
            )));
        }

        Ok(lessons)
    }

    /// Case-insensitive search over title and location
    pub async fn search(&self, term: &str) -> Result<Vec<Lesson>, AppError> {
        let lessons = self.lessons.search(term).await?;
        tracing::debug!(term, matches = lessons.len(), "Lesson search");
        Ok(lessons)
    }

    /// Apply a signed delta to one lesson and return its new available count
    pub async fn adjust(&self, id: LessonId, delta: i32) -> Result<i32, AppError> {
        let levels = self
            .adjust_many(vec![InventoryAdjustment::new(id, delta)])
            .await?;

        levels
            .into_iter()
            .find(|level| level.lesson_id == id)
            .map(|level| level.available_inventory)
            .ok_or_else(|| AppError::Internal(format!("No inventory level returned for {}", id)))
    }

    /// Apply a batch of signed deltas, all-or-nothing
    pub async fn adjust_many(
        &self,
        adjustments: Vec<InventoryAdjustment>,
    ) -> Result<Vec<InventoryLevel>, AppError> {
        if adjustments.is_empty() {
            return Err(AppError::BadRequest(
                "At least one lesson must be updated".to_string(),
            ));
        }

        let batch = ledger::consolidate(adjustments)?;
        let levels = self.lessons.adjust_inventory(&batch).await?;

        for (adjustment, level) in batch.iter().zip(&levels) {
            tracing::info!(
                lesson_id = %level.lesson_id,
                delta = adjustment.delta,
                available = level.available_inventory,
                "Inventory adjusted"
            );
        }

        Ok(levels)
    }
}

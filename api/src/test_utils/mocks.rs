//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Lesson, LessonId, NewOrder, Order, OrderId};
use crate::domain::ledger::{self, InventoryAdjustment, InventoryLevel, OrderDebits};
use crate::domain::ports::{LessonRepository, OrderRepository};
use crate::error::DomainError;

type LessonStore = Arc<RwLock<HashMap<LessonId, Lesson>>>;

fn unavailable() -> DomainError {
    DomainError::Database("connection refused".to_string())
}

/// Case-insensitive substring match against title or location
fn matches(lesson: &Lesson, term: &str) -> bool {
    let needle = term.to_lowercase();
    lesson.title.to_lowercase().contains(&needle)
        || lesson.location.to_lowercase().contains(&needle)
}

/// Apply a batch under one write lock: validate everything, then commit
///
/// The lock plays the role of the database's row-level atomicity.
fn apply_batch(
    store: &LessonStore,
    adjustments: &[InventoryAdjustment],
) -> Result<Vec<InventoryLevel>, DomainError> {
    let mut lessons = store.write().unwrap();

    let mut levels = Vec::with_capacity(adjustments.len());
    for adjustment in adjustments {
        let lesson = lessons.get(&adjustment.lesson_id).ok_or_else(|| {
            DomainError::NotFound(format!("Lesson {} not found", adjustment.lesson_id))
        })?;
        levels.push(InventoryLevel {
            lesson_id: lesson.id,
            available_inventory: ledger::apply_delta(lesson, adjustment.delta)?,
        });
    }

    for level in &levels {
        if let Some(lesson) = lessons.get_mut(&level.lesson_id) {
            lesson.available_inventory = level.available_inventory;
        }
    }

    Ok(levels)
}

// ============================================================================
// In-Memory Lesson Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryLessonRepository {
    lessons: LessonStore,
    fail: bool,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were unreachable
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a lesson for testing
    pub fn with_lesson(self, lesson: Lesson) -> Self {
        {
            let mut lessons = self.lessons.write().unwrap();
            lessons.insert(lesson.id, lesson);
        }
        self
    }

    /// Current available inventory of a lesson
    pub fn available(&self, id: &LessonId) -> Option<i32> {
        let lessons = self.lessons.read().unwrap();
        lessons.get(id).map(|l| l.available_inventory)
    }

    fn sorted(&self, filter: impl Fn(&Lesson) -> bool) -> Vec<Lesson> {
        let lessons = self.lessons.read().unwrap();
        let mut found: Vec<Lesson> = lessons.values().filter(|l| filter(l)).cloned().collect();
        found.sort_by(|a, b| a.title.cmp(&b.title));
        found
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn find_all(&self) -> Result<Vec<Lesson>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        Ok(self.sorted(|_| true))
    }

    async fn search(&self, term: &str) -> Result<Vec<Lesson>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        Ok(self.sorted(|l| matches(l, term)))
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        let lessons = self.lessons.read().unwrap();
        Ok(lessons.get(id).cloned())
    }

    async fn adjust_inventory(
        &self,
        adjustments: &[InventoryAdjustment],
    ) -> Result<Vec<InventoryLevel>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        apply_batch(&self.lessons, adjustments)
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

/// Shares the lesson store so placing an order debits the same inventory
/// the lesson repository reads
#[derive(Default)]
pub struct InMemoryOrderRepository {
    lessons: LessonStore,
    orders: Arc<RwLock<Vec<Order>>>,
    fail: bool,
}

impl InMemoryOrderRepository {
    pub fn new(lessons: &InMemoryLessonRepository) -> Self {
        Self {
            lessons: lessons.lessons.clone(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of stored orders
    pub fn count(&self) -> usize {
        self.orders.read().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn place(&self, order: &NewOrder) -> Result<Order, DomainError> {
        if self.fail {
            return Err(unavailable());
        }

        let OrderDebits {
            number_of_spaces,
            debits,
        } = ledger::debits_for(order)?;
        apply_batch(&self.lessons, &debits)?;

        let placed = Order {
            id: OrderId::new(),
            name: order.name.clone(),
            phone_number: order.phone_number.clone(),
            lines: order.lines.clone(),
            number_of_spaces,
            created_at: Utc::now(),
        };

        self.orders.write().unwrap().push(placed.clone());
        Ok(placed)
    }
}

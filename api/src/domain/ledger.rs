//! Inventory ledger
//!
//! Pure rules for moving a lesson's available-seat counter. Storage adapters
//! apply these rules atomically per lesson; nothing here touches shared state.
//!
//! Invariant: `0 <= available_inventory <= total_inventory` after every
//! committed adjustment.

use std::collections::BTreeMap;

use serde::Serialize;

use super::entities::{Lesson, LessonId, NewOrder};
use crate::error::DomainError;

/// A signed change to one lesson's available inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryAdjustment {
    pub lesson_id: LessonId,
    pub delta: i32,
}

impl InventoryAdjustment {
    pub fn new(lesson_id: LessonId, delta: i32) -> Self {
        Self { lesson_id, delta }
    }

    /// Remove `quantity` seats from a lesson
    pub fn debit(lesson_id: LessonId, quantity: i32) -> Self {
        Self::new(lesson_id, -quantity)
    }
}

/// Available inventory of a lesson after an adjustment was committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventoryLevel {
    pub lesson_id: LessonId,
    pub available_inventory: i32,
}

/// Compute the new available count for `lesson` after applying `delta`
pub fn apply_delta(lesson: &Lesson, delta: i32) -> Result<i32, DomainError> {
    let next = lesson
        .available_inventory
        .checked_add(delta)
        .ok_or_else(|| DomainError::Validation(format!("Adjustment {} out of range", delta)))?;

    check_bounds(lesson, delta, next)?;
    Ok(next)
}

/// Map a rejected adjustment to the error describing why it was rejected
///
/// Used by adapters whose conditional update matched no row for an
/// existing lesson.
pub fn rejection(lesson: &Lesson, delta: i32) -> DomainError {
    if delta < 0 {
        DomainError::InsufficientInventory {
            lesson_id: lesson.id,
            requested: delta.saturating_neg(),
            available: lesson.available_inventory,
        }
    } else {
        DomainError::CapacityExceeded {
            lesson_id: lesson.id,
            requested: delta,
            total: lesson.total_inventory,
        }
    }
}

fn check_bounds(lesson: &Lesson, delta: i32, next: i32) -> Result<(), DomainError> {
    if next < 0 || next > lesson.total_inventory {
        return Err(rejection(lesson, delta));
    }
    Ok(())
}

/// Merge adjustments for the same lesson and order the batch by lesson id
///
/// A consistent lock order keeps concurrent batches from deadlocking on
/// each other's rows.
pub fn consolidate(
    adjustments: impl IntoIterator<Item = InventoryAdjustment>,
) -> Result<Vec<InventoryAdjustment>, DomainError> {
    let mut merged: BTreeMap<LessonId, i32> = BTreeMap::new();

    for adjustment in adjustments {
        let entry = merged.entry(adjustment.lesson_id).or_insert(0);
        *entry = entry.checked_add(adjustment.delta).ok_or_else(|| {
            DomainError::Validation(format!(
                "Adjustment for lesson {} out of range",
                adjustment.lesson_id
            ))
        })?;
    }

    Ok(merged
        .into_iter()
        .map(|(lesson_id, delta)| InventoryAdjustment::new(lesson_id, delta))
        .collect())
}

/// What placing an order does to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDebits {
    /// Seats taken across all lines
    pub number_of_spaces: i32,
    /// One debit per lesson, sorted by lesson id
    pub debits: Vec<InventoryAdjustment>,
}

/// Validate an order and derive its debits: one per line, consolidated per lesson
pub fn debits_for(order: &NewOrder) -> Result<OrderDebits, DomainError> {
    let number_of_spaces = order.total_quantity()?;
    let debits = consolidate(
        order
            .lines
            .iter()
            .map(|line| InventoryAdjustment::debit(line.lesson_id, line.quantity)),
    )?;

    Ok(OrderDebits {
        number_of_spaces,
        debits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OrderLine;

    fn lesson(available: i32, total: i32) -> Lesson {
        Lesson {
            id: LessonId::new(),
            title: "Chess".to_string(),
            location: "Hendon".to_string(),
            price: 80.0,
            subject: "Chess".to_string(),
            image: None,
            total_inventory: total,
            available_inventory: available,
        }
    }

    #[test]
    fn apply_delta_debits_and_credits() {
        let l = lesson(3, 5);
        assert_eq!(apply_delta(&l, -2).unwrap(), 1);
        assert_eq!(apply_delta(&l, 2).unwrap(), 5);
        assert_eq!(apply_delta(&l, 0).unwrap(), 3);
    }

    #[test]
    fn apply_delta_allows_selling_out() {
        let l = lesson(3, 5);
        assert_eq!(apply_delta(&l, -3).unwrap(), 0);
    }

    #[test]
    fn apply_delta_rejects_overselling() {
        let l = lesson(3, 5);
        match apply_delta(&l, -4) {
            Err(DomainError::InsufficientInventory {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientInventory, got {:?}", other),
        }
    }

    #[test]
    fn apply_delta_rejects_restock_beyond_total() {
        let l = lesson(3, 5);
        assert!(matches!(
            apply_delta(&l, 3),
            Err(DomainError::CapacityExceeded { total: 5, .. })
        ));
    }

    #[test]
    fn apply_delta_never_goes_negative() {
        let l = lesson(2, 5);
        for delta in -10..=10 {
            if let Ok(next) = apply_delta(&l, delta) {
                assert!((0..=5).contains(&next), "delta {} gave {}", delta, next);
            }
        }
    }

    #[test]
    fn apply_delta_handles_extreme_values() {
        let l = lesson(2, 5);
        assert!(apply_delta(&l, i32::MIN).is_err());
        assert!(apply_delta(&l, i32::MAX).is_err());
    }

    #[test]
    fn consolidate_merges_and_sorts() {
        let a = LessonId::new();
        let b = LessonId::new();
        let batch = consolidate(vec![
            InventoryAdjustment::new(b, -1),
            InventoryAdjustment::new(a, -2),
            InventoryAdjustment::new(b, -3),
        ])
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch[0].lesson_id < batch[1].lesson_id);
        let delta_of = |id| batch.iter().find(|adj| adj.lesson_id == id).unwrap().delta;
        assert_eq!(delta_of(a), -2);
        assert_eq!(delta_of(b), -4);
    }

    #[test]
    fn consolidate_reports_overflow() {
        let a = LessonId::new();
        let result = consolidate(vec![
            InventoryAdjustment::new(a, i32::MIN),
            InventoryAdjustment::new(a, -1),
        ]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn debits_for_order_negates_quantities() {
        let a = LessonId::new();
        let order = NewOrder {
            name: "Ada".to_string(),
            phone_number: "0700".to_string(),
            lines: vec![
                OrderLine {
                    lesson_id: a,
                    quantity: 2,
                },
                OrderLine {
                    lesson_id: a,
                    quantity: 1,
                },
            ],
        };

        let derived = debits_for(&order).unwrap();
        assert_eq!(derived.number_of_spaces, 3);
        assert_eq!(derived.debits, vec![InventoryAdjustment::new(a, -3)]);
    }

    #[test]
    fn debits_for_rejects_invalid_order() {
        let order = NewOrder {
            name: "Ada".to_string(),
            phone_number: "0700".to_string(),
            lines: vec![],
        };
        assert!(debits_for(&order).is_err());
    }
}

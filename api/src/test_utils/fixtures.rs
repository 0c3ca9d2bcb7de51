//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use uuid::Uuid;

use crate::domain::entities::{Lesson, LessonId, NewOrder, OrderLine};
use crate::entity::lessons;

/// Create a test lesson with default values
pub fn test_lesson() -> Lesson {
    test_lesson_at("Chess", "Hendon")
}

/// Create a test lesson with a specific title and location
pub fn test_lesson_at(title: &str, location: &str) -> Lesson {
    Lesson {
        id: LessonId(Uuid::new_v4()),
        title: title.to_string(),
        location: location.to_string(),
        price: 100.0,
        subject: title.to_string(),
        image: Some(format!("{}.png", title.to_lowercase())),
        total_inventory: 5,
        available_inventory: 5,
    }
}

/// Create a new order for the given `(lesson, quantity)` pairs
pub fn test_new_order(lines: Vec<(LessonId, i32)>) -> NewOrder {
    NewOrder {
        name: "Ada Lovelace".to_string(),
        phone_number: "07123456789".to_string(),
        lines: lines
            .into_iter()
            .map(|(lesson_id, quantity)| OrderLine {
                lesson_id,
                quantity,
            })
            .collect(),
    }
}

/// Create a SeaORM lesson row, for mock database query results
pub fn test_lesson_model(title: &str, location: &str, available: i32) -> lessons::Model {
    lessons::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        location: location.to_string(),
        price: 100.0,
        subject: title.to_string(),
        image: None,
        total_inventory: 5,
        available_inventory: available,
    }
}

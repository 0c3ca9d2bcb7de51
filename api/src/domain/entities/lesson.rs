//! Lesson domain entity
//!
//! Represents a bookable lesson with a finite number of seats.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LessonId(pub Uuid);

impl LessonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LessonId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LessonId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable lesson
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub subject: String,
    /// File name of the lesson image, served under `/image`
    pub image: Option<String>,
    pub total_inventory: i32,
    pub available_inventory: i32,
}

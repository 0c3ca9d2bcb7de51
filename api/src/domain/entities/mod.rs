//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod lesson;
pub mod order;

pub use lesson::{Lesson, LessonId};
pub use order::{NewOrder, Order, OrderId, OrderLine};

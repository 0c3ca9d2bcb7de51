//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod assets;
pub mod lessons;
pub mod orders;

pub use assets::image_not_found;
pub use lessons::{list_lessons, search_lessons, update_inventory, update_lessons};
pub use orders::create_order;

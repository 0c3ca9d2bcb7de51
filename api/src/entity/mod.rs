//! SeaORM entity models
//!
//! Table definitions for the PostgreSQL schema in `api/schema.sql`.

pub mod lessons;
pub mod order_lines;
pub mod orders;

//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod lesson_repo;
pub mod order_repo;


pub use lesson_repo::PostgresLessonRepository;
pub use order_repo::PostgresOrderRepository;

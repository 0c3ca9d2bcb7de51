//! PostgreSQL adapter for LessonRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr},
    ConnectionTrait, Condition, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, Statement, TransactionTrait,
};

use crate::domain::entities::{Lesson, LessonId};
use crate::domain::ledger::{self, InventoryAdjustment, InventoryLevel};
use crate::domain::ports::LessonRepository;
use crate::entity::lessons;
use crate::error::DomainError;

/// Conditional increment: only matches when the result stays within bounds.
/// The row lock taken by UPDATE serialises concurrent writers of a lesson.
const ADJUST_SQL: &str = "UPDATE lessons \
     SET available_inventory = available_inventory + $1 \
     WHERE id = $2 \
       AND available_inventory::bigint + $1 BETWEEN 0 AND total_inventory \
     RETURNING available_inventory";

/// PostgreSQL implementation of LessonRepository
pub struct PostgresLessonRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresLessonRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonRepository for PostgresLessonRepository {
    async fn find_all(&self) -> Result<Vec<Lesson>, DomainError> {
        let results = lessons::Entity::find()
            .order_by_asc(lessons::Column::Title)
            .all(self.db.as_ref())
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Lesson>, DomainError> {
        let results = search_select(term).all(self.db.as_ref()).await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        let result = lessons::Entity::find_by_id(id.0).one(self.db.as_ref()).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn adjust_inventory(
        &self,
        adjustments: &[InventoryAdjustment],
    ) -> Result<Vec<InventoryLevel>, DomainError> {
        if adjustments.is_empty() {
            return Ok(Vec::new());
        }

        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;

        let mut levels = Vec::with_capacity(adjustments.len());
        for adjustment in adjustments {
            levels.push(apply_adjustment(&txn, adjustment).await?);
        }

        txn.commit().await?;

        Ok(levels)
    }
}

/// Apply one adjustment with a single atomic statement
///
/// When the conditional update matches nothing, the lesson is re-read to
/// tell a missing lesson apart from an out-of-bounds adjustment, and the
/// ledger rules name the violated bound.
pub(super) async fn apply_adjustment<C>(
    conn: &C,
    adjustment: &InventoryAdjustment,
) -> Result<InventoryLevel, DomainError>
where
    C: ConnectionTrait,
{
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        ADJUST_SQL,
        [adjustment.delta.into(), adjustment.lesson_id.0.into()],
    );

    match conn.query_one(stmt).await? {
        Some(row) => Ok(InventoryLevel {
            lesson_id: adjustment.lesson_id,
            available_inventory: row.try_get("", "available_inventory")?,
        }),
        None => {
            let lesson: Lesson = lessons::Entity::find_by_id(adjustment.lesson_id.0)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("Lesson {} not found", adjustment.lesson_id))
                })?
                .into();

            Err(match ledger::apply_delta(&lesson, adjustment.delta) {
                Err(e) => e,
                // The row moved between the update and the re-read
                Ok(_) => ledger::rejection(&lesson, adjustment.delta),
            })
        }
    }
}

/// Lessons whose title or location contains `term`
///
/// ILIKE folds case on both sides with the database's own rules.
fn search_select(term: &str) -> Select<lessons::Entity> {
    let pattern = format!("%{}%", escape_like(term));

    lessons::Entity::find()
        .filter(
            Condition::any()
                .add(Expr::col(lessons::Column::Title).ilike(pattern.as_str()))
                .add(Expr::col(lessons::Column::Location).ilike(pattern.as_str())),
        )
        .order_by_asc(lessons::Column::Title)
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert SeaORM model to domain entity
impl From<lessons::Model> for Lesson {
    fn from(model: lessons::Model) -> Self {
        Lesson {
            id: model.id.into(),
            title: model.title,
            location: model.location,
            price: model.price,
            subject: model.subject,
            image: model.image,
            total_inventory: model.total_inventory,
            available_inventory: model.available_inventory,
        }
    }
}

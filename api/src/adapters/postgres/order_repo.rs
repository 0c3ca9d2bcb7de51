//! PostgreSQL adapter for OrderRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::lesson_repo::apply_adjustment;
use crate::domain::entities::{NewOrder, Order, OrderId};
use crate::domain::ledger::{self, OrderDebits};
use crate::domain::ports::OrderRepository;
use crate::entity::{order_lines, orders};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn place(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let OrderDebits {
            number_of_spaces,
            debits,
        } = ledger::debits_for(order)?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let txn = self.db.begin().await?;

        orders::ActiveModel {
            id: Set(id),
            name: Set(order.name.clone()),
            phone_number: Set(order.phone_number.clone()),
            number_of_spaces: Set(number_of_spaces),
            created_at: Set(now.fixed_offset()),
        }
        .insert(&txn)
        .await?;

        // Debit before inserting lines so a missing lesson surfaces as NotFound
        // rather than a foreign key violation
        for debit in &debits {
            apply_adjustment(&txn, debit).await?;
        }

        let lines = order
            .lines
            .iter()
            .enumerate()
            .map(|(position, line)| order_lines::ActiveModel {
                order_id: Set(id),
                position: Set(position as i32),
                lesson_id: Set(line.lesson_id.0),
                quantity: Set(line.quantity),
            });
        order_lines::Entity::insert_many(lines).exec(&txn).await?;

        txn.commit().await?;

        Ok(Order {
            id: OrderId(id),
            name: order.name.clone(),
            phone_number: order.phone_number.clone(),
            lines: order.lines.clone(),
            number_of_spaces,
            created_at: now,
        })
    }
}

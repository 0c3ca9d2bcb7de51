//! Order handlers
//!
//! Endpoint for submitting orders.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{LessonId, NewOrder, Order, OrderLine};
use crate::error::AppError;
use crate::AppState;

/// One requested lesson in an order
#[derive(Debug, Deserialize, Serialize)]
pub struct OrderLineBody {
    #[serde(rename = "lessonID")]
    pub lesson_id: Uuid,
    #[serde(rename = "numberOfLessons")]
    pub number_of_lessons: i32,
}

/// Request body for placing an order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub name: String,
    pub phone_number: String,
    pub lessons: Vec<OrderLineBody>,
}

/// Response body for a placed order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub lessons: Vec<OrderLineBody>,
    pub number_of_spaces: i32,
    pub created_at: String,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            name: request.name,
            phone_number: request.phone_number,
            lines: request
                .lessons
                .into_iter()
                .map(|line| OrderLine {
                    lesson_id: LessonId::from(line.lesson_id),
                    quantity: line.number_of_lessons,
                })
                .collect(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.to_string(),
            name: order.name,
            phone_number: order.phone_number,
            lessons: order
                .lines
                .into_iter()
                .map(|line| OrderLineBody {
                    lesson_id: line.lesson_id.0,
                    number_of_lessons: line.quantity,
                })
                .collect(),
            number_of_spaces: order.number_of_spaces,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// POST /orders
///
/// Place an order and take its seats from each lesson's inventory.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let order = state.order_service.place_order(request.into()).await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

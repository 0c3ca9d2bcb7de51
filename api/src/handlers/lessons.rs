//! Lesson handlers
//!
//! Endpoints for listing and searching lessons and for adjusting their
//! available inventory.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Lesson, LessonId};
use crate::domain::ledger::{InventoryAdjustment, InventoryLevel};
use crate::error::AppError;
use crate::AppState;

/// Lesson as exposed to the storefront
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub subject: String,
    pub image: Option<String>,
    pub total_inventory: i32,
    pub available_inventory: i32,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        LessonResponse {
            id: lesson.id.to_string(),
            title: lesson.title,
            location: lesson.location,
            price: lesson.price,
            subject: lesson.subject,
            image: lesson.image,
            total_inventory: lesson.total_inventory,
            available_inventory: lesson.available_inventory,
        }
    }
}

/// Query parameters for searching lessons
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// One entry of a bulk inventory update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonItem {
    #[serde(alias = "_id")]
    pub lesson_id: Uuid,
    /// Seats to take; a negative value returns seats
    pub quantity: i32,
}

/// Request body for updating a single lesson's inventory
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    /// Seats to take; a negative value returns seats
    pub number_of_lessons_to_update: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevelResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub available_inventory: i32,
}

impl From<InventoryLevel> for InventoryLevelResponse {
    fn from(level: InventoryLevel) -> Self {
        InventoryLevelResponse {
            id: level.lesson_id.to_string(),
            available_inventory: level.available_inventory,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateLessonsResponse {
    pub message: String,
    pub lessons: Vec<InventoryLevelResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryResponse {
    pub message: String,
    pub available_inventory: i32,
}

/// Turn a "seats taken" count into a signed ledger delta
fn taken_to_delta(taken: i32) -> Result<i32, AppError> {
    taken
        .checked_neg()
        .ok_or_else(|| AppError::BadRequest(format!("Quantity {} out of range", taken)))
}

/// GET /lessons
///
/// List all lessons. Responds 404 when the catalog is empty.
pub async fn list_lessons(
    State(state): State<AppState>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    let lessons = state.catalog_service.list_lessons().await?;

    Ok(Json(lessons.into_iter().map(LessonResponse::from).collect()))
}

/// GET /search?q=term
///
/// Lessons whose title or location contains the term, ignoring case.
pub async fn search_lessons(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    let lessons = state.catalog_service.search(&query.q).await?;

    Ok(Json(lessons.into_iter().map(LessonResponse::from).collect()))
}

/// PUT /updateLessons
///
/// Take seats from several lessons at once. Either every lesson is updated
/// or none is.
pub async fn update_lessons(
    State(state): State<AppState>,
    Json(items): Json<Vec<UpdateLessonItem>>,
) -> Result<Json<UpdateLessonsResponse>, AppError> {
    let adjustments = items
        .into_iter()
        .map(|item| {
            Ok(InventoryAdjustment::new(
                LessonId::from(item.lesson_id),
                taken_to_delta(item.quantity)?,
            ))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let levels = state.catalog_service.adjust_many(adjustments).await?;

    Ok(Json(UpdateLessonsResponse {
        message: "Spaces updated".to_string(),
        lessons: levels.into_iter().map(InventoryLevelResponse::from).collect(),
    }))
}

/// PUT /updateInventory/:lesson_id
///
/// Take seats from a single lesson.
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(request): Json<UpdateInventoryRequest>,
) -> Result<Json<UpdateInventoryResponse>, AppError> {
    let delta = taken_to_delta(request.number_of_lessons_to_update)?;
    let available = state
        .catalog_service
        .adjust(LessonId::from(lesson_id), delta)
        .await?;

    Ok(Json(UpdateInventoryResponse {
        message: "Spaces updated successfully".to_string(),
        available_inventory: available,
    }))
}

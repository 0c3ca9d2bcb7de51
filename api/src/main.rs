//! Lessons API Server
//!
//! REST backend for a lessons storefront: lists and searches lessons, takes
//! orders and keeps each lesson's available seats consistent with them.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod logging;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresLessonRepository, PostgresOrderRepository};
use app::{CatalogService, OrderService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService<PostgresLessonRepository>>,
    pub order_service: Arc<OrderService<PostgresOrderRepository>>,
}

impl AppState {
    /// Wire adapters and services over one database connection
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        let lesson_repo = Arc::new(PostgresLessonRepository::new(db.clone()));
        let order_repo = Arc::new(PostgresOrderRepository::new(db));

        Self {
            catalog_service: Arc::new(CatalogService::new(lesson_repo)),
            order_service: Arc::new(OrderService::new(order_repo)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let images =
        ServeDir::new(static_dir).not_found_service(handlers::image_not_found.into_service());

    Router::new()
        .route("/health", get(health))
        // Catalog
        .route("/lessons", get(handlers::list_lessons))
        .route("/search", get(handlers::search_lessons))
        // Orders and inventory
        .route("/orders", post(handlers::create_order))
        .route("/updateLessons", put(handlers::update_lessons))
        .route(
            "/updateInventory/:lesson_id",
            put(handlers::update_inventory),
        )
        // Static assets
        .nest_service("/image", images)
        // Middleware
        .layer(middleware::from_fn(logging::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lessons_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lessons API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::new(db);
    let app = router(state, &config.static_dir);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

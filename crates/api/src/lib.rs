//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - The booking schedule endpoint
//! - Shared application state

pub mod routes;

use axum::Router;
use immobook_core::Clock;
use immobook_core::schedule::ScheduleService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Source of "today" for the rolling schedule window.
    pub clock: Arc<dyn Clock>,
    /// Schedule generator configured with the horizon.
    pub schedule: ScheduleService,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

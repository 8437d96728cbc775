//! Booking schedule routes.
//!
//! `POST /bookings/generate` turns one recurring source record into booking
//! suggestions for the rolling horizon. Nothing is written.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use immobook_core::schedule::{BookingSuggestion, ScheduleError};
use immobook_core::sources::SourceRecord;
use immobook_db::SourceRepository;
use immobook_shared::AppError;
use immobook_shared::types::BuildingId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;

/// Creates the booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings/generate", post(generate_bookings))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for generating booking suggestions.
#[derive(Debug, Deserialize)]
pub struct GenerateBookingsRequest {
    /// Source kind, e.g. "Loan" or "Mietvertrag".
    pub source_type: String,
    /// Source record ID.
    pub source_id: String,
}

/// Successful generation response.
#[derive(Debug, Serialize)]
pub struct GenerateBookingsResponse {
    /// Always true.
    pub success: bool,
    /// Building of the source, if known.
    pub building_id: Option<BuildingId>,
    /// The source record as read.
    pub source_data: SourceRecord,
    /// Suggestions in due-date order.
    pub booking_suggestions: Vec<BookingSuggestion>,
    /// Number of suggestions.
    pub count: usize,
    /// Last date considered.
    pub horizon: NaiveDate,
    /// Data-quality notes.
    pub warnings: Vec<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Builds the API error envelope. `details` is only set for server errors.
fn error_envelope(
    status: StatusCode,
    code: &str,
    message: String,
    details: Option<String>,
) -> Response {
    let mut body = json!({
        "success": false,
        "error": message,
        "code": code,
        "http_status": status.as_u16(),
    });
    if let Some(details) = details {
        body["details"] = json!(details);
    }
    (status, Json(body)).into_response()
}

/// Renders a schedule error, keeping its specific code.
fn schedule_error_response(err: &ScheduleError) -> Response {
    let status = status_of(err.http_status_code());
    let details = if status.is_server_error() {
        error!(error = ?err, code = err.error_code(), "Booking generation failed");
        Some(format!("{err:?}"))
    } else {
        warn!(error = %err, code = err.error_code(), "Booking generation rejected");
        None
    };
    error_envelope(status, err.error_code(), err.to_string(), details)
}

/// Renders an application error raised outside schedule generation.
fn app_error_response(err: &AppError) -> Response {
    let details = if err.is_server_error() {
        error!(error = ?err, code = err.error_code(), "Booking request failed");
        Some(format!("{err:?}"))
    } else {
        warn!(error = %err, code = err.error_code(), "Booking request rejected");
        None
    };
    error_envelope(
        status_of(err.status_code()),
        err.error_code(),
        err.to_string(),
        details,
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /bookings/generate
async fn generate_bookings(
    State(state): State<AppState>,
    payload: Result<Json<GenerateBookingsRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return app_error_response(&AppError::InvalidRequest(rejection.body_text()));
        }
    };

    let today = state.clock.today();
    let repo = SourceRepository::new((*state.db).clone());

    let outcome = match state
        .schedule
        .generate_for(&repo, &request.source_type, &request.source_id, today)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return schedule_error_response(&err),
    };

    let schedule = outcome.schedule;
    for warning in &schedule.warnings {
        warn!(
            source_type = %schedule.source_type,
            source_id = %schedule.source_id,
            "{warning}"
        );
    }
    info!(
        source_type = %schedule.source_type,
        source_id = %schedule.source_id,
        count = schedule.count(),
        horizon = %schedule.horizon,
        "Generated booking suggestions"
    );

    let response = GenerateBookingsResponse {
        success: true,
        building_id: schedule.building_id,
        source_data: outcome.source,
        count: schedule.count(),
        booking_suggestions: schedule.suggestions,
        horizon: schedule.horizon,
        warnings: schedule.warnings,
    };
    (StatusCode::OK, Json(response)).into_response()
}

//! Admin API Handlers

use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::api::{app_state::AppState, dto::admin_dto::AdminDataResponse};

/// Engine counts, samples and prediction thresholds
///
/// GET /api/v1/debug
pub async fn debug_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.guess_service.debug_snapshot().await)
}

/// Full question bank and entity catalog
///
/// GET /api/v1/admin/data
pub async fn admin_data(State(state): State<AppState>) -> impl IntoResponse {
    let export = state.guess_service.export_state().await;
    debug!(
        "Exporting {} questions and {} entities",
        export.questions.len(),
        export.entities.len()
    );

    Json(AdminDataResponse::from(export))
}

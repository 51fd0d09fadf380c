//! Production run HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::production::{CreateRunInput, FinalizeDraftInput, ProductionService};
use crate::AppState;

/// Create a production run, either as draft or finalized
pub async fn create_run(
    State(state): State<AppState>,
    Json(input): Json<CreateRunInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.create_run(input) {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Finalize a draft run
pub async fn finalize_draft(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
    Json(input): Json<FinalizeDraftInput>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.finalize_draft(&run_id, input) {
        Ok(run) => (StatusCode::OK, Json(run)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List production runs, newest first
pub async fn list_runs(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.list_runs() {
        Ok(runs) => (StatusCode::OK, Json(serde_json::json!({ "runs": runs }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a run by its batch number
pub async fn get_run_by_batch(
    State(state): State<AppState>,
    Path(batch_number): Path<String>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());

    match service.get_run_by_batch(&batch_number) {
        Ok(run) => (StatusCode::OK, Json(run)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Selectable weeks for the run form
pub async fn get_week_options(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.store.clone());
    Json(service.week_options())
}

//! Shipment declaration HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::preadvice::{PreadviceService, ValidateDeclarationInput};
use crate::AppState;

/// Validate a shipment declaration against the registry
pub async fn validate_declaration(
    State(state): State<AppState>,
    Json(input): Json<ValidateDeclarationInput>,
) -> impl IntoResponse {
    let service = PreadviceService::new(state.store.clone(), state.traces.clone());

    match service.validate(input).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List valid announcements still waiting for goods
pub async fn list_pending_preadvice(State(state): State<AppState>) -> impl IntoResponse {
    let service = PreadviceService::new(state.store.clone(), state.traces.clone());

    match service.list_pending() {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "preadvice": entries }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

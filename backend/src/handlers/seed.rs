//! Development data endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::error::AppError;
use crate::services::SeedService;
use crate::AppState;

/// Load demo data (development only)
pub async fn seed_demo_data(State(state): State<AppState>) -> impl IntoResponse {
    if !state.config.is_development() {
        return AppError::Forbidden("Seeding is only available in development".to_string())
            .into_response();
    }
    let service = SeedService::new(state.store.clone());

    match service.seed_demo_data() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Clear all data (development only)
pub async fn clear_all_data(State(state): State<AppState>) -> impl IntoResponse {
    if !state.config.is_development() {
        return AppError::Forbidden("Clearing data is only available in development".to_string())
            .into_response();
    }
    let service = SeedService::new(state.store.clone());

    match service.clear_all() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

//! Dashboard HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::dashboard::{ActivityItem, DashboardService, DashboardStats};
use crate::AppState;

/// Headline totals across receipts, inventory and runs
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let service = DashboardService::new(state.store.clone());
    Ok(Json(service.stats()?))
}

/// Recent receipts and production runs, newest first
pub async fn get_recent_activity(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActivityItem>>> {
    let service = DashboardService::new(state.store.clone());
    Ok(Json(service.recent_activity()?))
}

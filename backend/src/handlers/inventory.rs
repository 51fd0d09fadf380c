//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use shared::models::{InventoryLot, InventorySummary};

use crate::error::AppResult;
use crate::services::inventory::{InventoryService, LotFilter};
use crate::AppState;

/// List inventory lots with optional status, wood type and sort filters
pub async fn list_lots(
    State(state): State<AppState>,
    Query(filter): Query<LotFilter>,
) -> AppResult<Json<Vec<InventoryLot>>> {
    let service = InventoryService::new(state.store.clone());
    Ok(Json(service.list_lots(filter)?))
}

/// Ledger totals and distinct tallies
pub async fn get_inventory_summary(
    State(state): State<AppState>,
) -> AppResult<Json<InventorySummary>> {
    let service = InventoryService::new(state.store.clone());
    Ok(Json(service.summary()?))
}

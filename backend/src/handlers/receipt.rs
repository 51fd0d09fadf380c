//! Goods receipt HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::receipt::{ReceiptService, RegisterReceiptInput};
use crate::AppState;

/// Register a goods receipt and put the derived lot into stock
pub async fn register_receipt(
    State(state): State<AppState>,
    Json(input): Json<RegisterReceiptInput>,
) -> impl IntoResponse {
    let service = ReceiptService::new(state.store.clone());

    match service.register(input) {
        Ok(registered) => (StatusCode::CREATED, Json(registered)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all receipts
pub async fn list_receipts(State(state): State<AppState>) -> impl IntoResponse {
    let service = ReceiptService::new(state.store.clone());

    match service.list() {
        Ok(receipts) => {
            (StatusCode::OK, Json(serde_json::json!({ "receipts": receipts }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

//! Reporting handlers for traceability reports and data export

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::{ProducedProductTotal, ReportingService};
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Get the traceability report for a completed batch
pub async fn get_batch_report(
    State(state): State<AppState>,
    Path(batch_number): Path<String>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let report = service.batch_report(&batch_number)?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&report.consumed_lots)?;
        let disposition = format!(
            "attachment; filename=\"batch-rapport-{}.csv\"",
            report.batch_number
        );
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(report).into_response())
    }
}

/// Produced product totals across all batches
pub async fn get_produced_product_totals(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProducedProductTotal>>> {
    let service = ReportingService::new(state.store.clone());
    Ok(Json(service.produced_product_totals()?))
}

//! Route definitions for the Wood Traceability Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Declaration validation and pending announcements
        .nest("/preadvice", preadvice_routes())
        // Goods receipts
        .nest("/receipts", receipt_routes())
        // Inventory ledger
        .nest("/inventory", inventory_routes())
        // Weekly production runs
        .nest("/production", production_routes())
        // Traceability reports
        .nest("/reports", report_routes())
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Development helpers
        .nest("/dev", dev_routes())
}

/// Preadvice routes
fn preadvice_routes() -> Router<AppState> {
    Router::new()
        .route("/validate", post(handlers::validate_declaration))
        .route("/pending", get(handlers::list_pending_preadvice))
}

/// Goods receipt routes
fn receipt_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_receipts).post(handlers::register_receipt),
    )
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots))
        .route("/summary", get(handlers::get_inventory_summary))
}

/// Production run routes
fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/runs", get(handlers::list_runs).post(handlers::create_run))
        .route("/runs/batch/:batch_number", get(handlers::get_run_by_batch))
        .route("/runs/:run_id/finalize", post(handlers::finalize_draft))
        .route("/week-options", get(handlers::get_week_options))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/batch/:batch_number", get(handlers::get_batch_report))
        .route("/products", get(handlers::get_produced_product_totals))
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard_stats))
        .route("/activity", get(handlers::get_recent_activity))
}

/// Development-only data routes
fn dev_routes() -> Router<AppState> {
    Router::new()
        .route("/seed", post(handlers::seed_demo_data))
        .route("/clear", post(handlers::clear_all_data))
}

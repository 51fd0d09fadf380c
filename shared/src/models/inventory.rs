//! Inventory ledger models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::LotStatus;

/// A traceable lot of wood held in the yard
///
/// Every lot is derived from exactly one goods receipt and keeps the
/// registry reference of the shipment it arrived under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLot {
    pub id: String,
    pub reference_id: String,
    pub receipt_id: String,
    pub wood_type: String,
    /// Received volume in cubic metres
    pub volume: Decimal,
    /// Volume not yet consumed by production
    pub available_volume: Decimal,
    pub supplier_name: String,
    pub received_at: DateTime<Utc>,
    pub status: LotStatus,
    /// Bumped on every stored update; stale writers are rejected
    #[serde(default)]
    pub version: u64,
}

/// Aggregated volumes and tallies over the whole ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_volume: Decimal,
    pub available_volume: Decimal,
    pub in_production_volume: Decimal,
    pub processed_volume: Decimal,
    /// Volume of every lot not yet processed
    pub unprocessed_volume: Decimal,
    pub lot_count: usize,
    pub unique_suppliers: usize,
    pub unique_wood_types: usize,
}

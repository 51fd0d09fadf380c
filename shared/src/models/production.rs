//! Production run models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RunStatus;

/// A product recorded as output of a production run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputProduct {
    pub id: String,
    pub name: String,
    pub quantity: Decimal,
    /// Unit of measure, e.g. "st" (pieces) or "m³"
    pub unit: String,
}

/// A weekly sawmill production run
///
/// A draft records the intended week and lot selection without touching
/// inventory; completing the run is what consumes the selected lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRun {
    pub id: String,
    /// Batch number in the form BATCH-YYYY-WNN
    pub batch_number: String,
    pub week: u32,
    pub year: i32,
    /// Registry references of the lots consumed by this run
    pub consumed_reference_ids: Vec<String>,
    /// Sum of the full volume of every consumed lot, in cubic metres
    pub input_volume: Decimal,
    /// Absent on runs completed without recorded outputs
    pub output_products: Option<Vec<OutputProduct>>,
    pub status: RunStatus,
    pub produced_at: DateTime<Utc>,
    /// Bumped on every stored update; stale writers are rejected
    #[serde(default)]
    pub version: u64,
}

/// A sellable product row written when a run is completed with outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducedProduct {
    pub id: String,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub batch_number: String,
    pub run_id: String,
    pub produced_at: DateTime<Utc>,
}

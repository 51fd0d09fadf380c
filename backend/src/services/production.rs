//! Weekly production run service
//!
//! A production run consumes whole inventory lots for one calendar week
//! and records the products made from them. Drafts only park the lot
//! selection; finalizing is what consumes inventory.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::calculations::{batch_number, week_options, WeekOption};
use shared::models::{InventoryLot, OutputProduct, ProducedProduct, ProductionRun};
use shared::types::{prefixed_id, LotStatus, RunStatus, PRODUCT_ID_PREFIX, RUN_ID_PREFIX};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Production service for weekly runs
#[derive(Clone)]
pub struct ProductionService {
    store: Store,
}

/// Input for creating a production run
#[derive(Debug, Deserialize)]
pub struct CreateRunInput {
    pub week: u32,
    pub year: i32,
    /// Registry references of the lots to consume
    pub reference_ids: Vec<String>,
    #[serde(default)]
    pub output_products: Vec<OutputProductInput>,
    /// Complete the run immediately instead of saving a draft
    #[serde(default)]
    pub finalize: bool,
}

/// Product recorded as output of a run
#[derive(Debug, Deserialize)]
pub struct OutputProductInput {
    pub name: String,
    pub quantity: Decimal,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "st".to_string()
}

/// Input for finalizing a draft run
#[derive(Debug, Deserialize)]
pub struct FinalizeDraftInput {
    pub output_products: Vec<OutputProductInput>,
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a run for a week
    ///
    /// A draft only records the lot selection. A finalized run requires
    /// every selected lot to be available, consumes them and refuses a
    /// second completed run for the same week and year.
    pub fn create_run(&self, input: CreateRunInput) -> AppResult<ProductionRun> {
        if input.reference_ids.is_empty() {
            return Err(AppError::Validation {
                field: "reference_ids".to_string(),
                message: "Select at least one lot for the run".to_string(),
                message_nl: "Selecteer minimaal één vracht voor de run".to_string(),
            });
        }
        if !(1..=53).contains(&input.week) {
            return Err(AppError::Validation {
                field: "week".to_string(),
                message: format!("Week {} is outside the calendar", input.week),
                message_nl: format!("Week {} valt buiten de kalender", input.week),
            });
        }
        validate_outputs(&input.output_products)?;

        let lots = self.store.inventory()?;
        let selected = select_lots(&lots, &input.reference_ids);
        let input_volume: Decimal = selected.iter().map(|l| l.volume).sum();

        let run = ProductionRun {
            id: prefixed_id(RUN_ID_PREFIX),
            batch_number: batch_number(input.week, input.year),
            week: input.week,
            year: input.year,
            consumed_reference_ids: input.reference_ids,
            input_volume,
            output_products: mint_outputs(input.output_products),
            status: if input.finalize {
                RunStatus::Completed
            } else {
                RunStatus::Draft
            },
            produced_at: Utc::now(),
            version: 0,
        };

        if run.status == RunStatus::Draft {
            // Drafts never conflict and leave inventory untouched
            return self.store.append_run(run);
        }

        for lot in &selected {
            if lot.status != LotStatus::Available {
                return Err(lot_not_available(&lot.reference_id));
            }
        }

        let consumed: Vec<(String, u64)> = selected
            .iter()
            .map(|l| (l.reference_id.clone(), l.version))
            .collect();
        let produced = produced_rows(&run);
        let (week, year) = (run.week, run.year);
        self.store
            .commit_run(run, &consumed, produced, move |runs| {
                check_week_free(runs, week, year)
            })
    }

    /// Promote a draft to a completed run
    ///
    /// Requires output products, re-checks the week conflict and consumes
    /// the draft's lots. The draft row is replaced in place.
    pub fn finalize_draft(&self, run_id: &str, input: FinalizeDraftInput) -> AppResult<ProductionRun> {
        if input.output_products.is_empty() {
            return Err(AppError::Validation {
                field: "output_products".to_string(),
                message: "At least one output product is required to finalize a run".to_string(),
                message_nl: "Minimaal één eindproduct is verplicht om een run af te ronden".to_string(),
            });
        }
        validate_outputs(&input.output_products)?;

        let runs = self.store.production_runs()?;
        let draft = runs
            .iter()
            .find(|r| r.id == run_id)
            .ok_or_else(|| AppError::NotFound("Production run".to_string()))?;
        if draft.status != RunStatus::Draft {
            return Err(AppError::InvalidStateTransition(format!(
                "Run {} is already completed",
                draft.batch_number
            )));
        }

        let lots = self.store.inventory()?;
        let selected = select_lots(&lots, &draft.consumed_reference_ids);
        for lot in &selected {
            if lot.status != LotStatus::Available {
                return Err(lot_not_available(&lot.reference_id));
            }
        }

        let mut finalized = draft.clone();
        finalized.status = RunStatus::Completed;
        finalized.output_products = mint_outputs(input.output_products);
        finalized.produced_at = Utc::now();
        finalized.version = draft.version + 1;

        let consumed: Vec<(String, u64)> = selected
            .iter()
            .map(|l| (l.reference_id.clone(), l.version))
            .collect();
        let produced = produced_rows(&finalized);
        let (week, year) = (finalized.week, finalized.year);
        self.store
            .commit_draft_finalize(draft.version, finalized, &consumed, produced, move |runs| {
                check_week_free(runs, week, year)
            })
    }

    /// All runs, newest first
    pub fn list_runs(&self) -> AppResult<Vec<ProductionRun>> {
        let mut runs = self.store.production_runs()?;
        runs.sort_by(|a, b| b.produced_at.cmp(&a.produced_at));
        Ok(runs)
    }

    /// Find a run by its batch number
    pub fn get_run_by_batch(&self, batch: &str) -> AppResult<ProductionRun> {
        self.store
            .production_runs()?
            .into_iter()
            .find(|r| r.batch_number == batch)
            .ok_or_else(|| AppError::NotFound("Production run".to_string()))
    }

    /// Selectable weeks around today: ten back, the current one and two ahead
    pub fn week_options(&self) -> Vec<WeekOption> {
        week_options(Utc::now().date_naive())
    }
}

fn select_lots<'a>(lots: &'a [InventoryLot], reference_ids: &[String]) -> Vec<&'a InventoryLot> {
    lots.iter()
        .filter(|l| reference_ids.contains(&l.reference_id))
        .collect()
}

fn validate_outputs(outputs: &[OutputProductInput]) -> AppResult<()> {
    for product in outputs {
        if product.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "output_products".to_string(),
                message: "Output product name is required".to_string(),
                message_nl: "Productnaam is verplicht".to_string(),
            });
        }
        if product.quantity <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "output_products".to_string(),
                message: format!("Output quantity for {} must be greater than zero", product.name),
                message_nl: format!("Hoeveelheid voor {} moet groter zijn dan nul", product.name),
            });
        }
    }
    Ok(())
}

fn mint_outputs(inputs: Vec<OutputProductInput>) -> Option<Vec<OutputProduct>> {
    if inputs.is_empty() {
        return None;
    }
    Some(
        inputs
            .into_iter()
            .map(|p| OutputProduct {
                id: prefixed_id(PRODUCT_ID_PREFIX),
                name: p.name.trim().to_string(),
                quantity: p.quantity,
                unit: p.unit,
            })
            .collect(),
    )
}

/// Produced product rows for a completed run, reusing the output ids so a
/// report line can be traced back to the run output it came from
fn produced_rows(run: &ProductionRun) -> Vec<ProducedProduct> {
    run.output_products
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| ProducedProduct {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            unit: p.unit.clone(),
            batch_number: run.batch_number.clone(),
            run_id: run.id.clone(),
            produced_at: run.produced_at,
        })
        .collect()
}

fn check_week_free(runs: &[ProductionRun], week: u32, year: i32) -> AppResult<()> {
    let taken = runs
        .iter()
        .any(|r| r.status == RunStatus::Completed && r.week == week && r.year == year);
    if taken {
        return Err(AppError::Conflict {
            resource: "production_run".to_string(),
            message: format!("A completed run already exists for week {}/{}", week, year),
            message_nl: format!("Er bestaat al een afgeronde run voor week {}/{}", week, year),
        });
    }
    Ok(())
}

fn lot_not_available(reference_id: &str) -> AppError {
    AppError::Conflict {
        resource: "inventory_lot".to_string(),
        message: format!("Lot {} is not available for production", reference_id),
        message_nl: format!("Vracht {} is niet beschikbaar voor productie", reference_id),
    }
}

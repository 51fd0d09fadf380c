//! Demo data seeding for development environments

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::calculations::{batch_number, production_week};
use shared::models::{InventoryLot, OutputProduct, ProducedProduct, ProductionRun};
use shared::types::{
    prefixed_id, LotStatus, RunStatus, LOT_ID_PREFIX, PRODUCT_ID_PREFIX, RECEIPT_ID_PREFIX,
    RUN_ID_PREFIX,
};

use crate::error::AppResult;
use crate::store::{Store, StoreSnapshot};

/// Seed service that fills or empties the store for demos
#[derive(Clone)]
pub struct SeedService {
    store: Store,
}

/// Counts written by the seeder
#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub inventory_lots: usize,
    pub production_runs: usize,
    pub produced_products: usize,
}

impl SeedService {
    /// Create a new SeedService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Replace every collection with a small demo dataset: two available
    /// lots plus a completed run for the current week that consumed two
    /// more
    pub fn seed_demo_data(&self) -> AppResult<SeedSummary> {
        let now = Utc::now();
        let today = now.date_naive();
        let week = production_week(today);
        let year = today.year();
        let batch = batch_number(week, year);

        let inventory = vec![
            demo_lot("TRACES-DEMO00001", "Grenen", 10, LotStatus::Available, now),
            demo_lot("TRACES-DEMO00002", "Vurenhout", 8, LotStatus::Available, now),
            demo_lot("TRACES-DEMO00003", "Eikenhout", 12, LotStatus::Processed, now),
            demo_lot("TRACES-DEMO00004", "Beukenhout", 6, LotStatus::Processed, now),
        ];

        let run_id = prefixed_id(RUN_ID_PREFIX);
        let outputs = vec![
            demo_output("Chips", 5, "m³"),
            demo_output("Zaagsel", 2, "tonnen"),
            demo_output("Pallets Euro", 12, "stuks"),
            demo_output("Pallets Bewerkt", 8, "stuks"),
        ];
        let produced: Vec<ProducedProduct> = outputs
            .iter()
            .map(|p| ProducedProduct {
                id: p.id.clone(),
                name: p.name.clone(),
                quantity: p.quantity,
                unit: p.unit.clone(),
                batch_number: batch.clone(),
                run_id: run_id.clone(),
                produced_at: now,
            })
            .collect();

        let run = ProductionRun {
            id: run_id,
            batch_number: batch,
            week,
            year,
            consumed_reference_ids: vec![
                "TRACES-DEMO00003".to_string(),
                "TRACES-DEMO00004".to_string(),
            ],
            input_volume: Decimal::from(18),
            output_products: Some(outputs),
            status: RunStatus::Completed,
            produced_at: now,
            version: 0,
        };

        let snapshot = StoreSnapshot {
            inventory,
            production_runs: vec![run],
            produced_products: produced,
            ..Default::default()
        };
        let summary = SeedSummary {
            inventory_lots: snapshot.inventory.len(),
            production_runs: snapshot.production_runs.len(),
            produced_products: snapshot.produced_products.len(),
        };
        self.store.replace_all(snapshot)?;
        Ok(summary)
    }

    /// Empty every collection
    pub fn clear_all(&self) -> AppResult<()> {
        self.store.replace_all(StoreSnapshot::default())
    }
}

fn demo_lot(
    reference_id: &str,
    wood_type: &str,
    volume: i64,
    status: LotStatus,
    received_at: DateTime<Utc>,
) -> InventoryLot {
    let volume = Decimal::from(volume);
    InventoryLot {
        id: prefixed_id(LOT_ID_PREFIX),
        reference_id: reference_id.to_string(),
        receipt_id: prefixed_id(RECEIPT_ID_PREFIX),
        wood_type: wood_type.to_string(),
        volume,
        available_volume: volume,
        supplier_name: "Demo Leverancier".to_string(),
        received_at,
        status,
        version: 0,
    }
}

fn demo_output(name: &str, quantity: i64, unit: &str) -> OutputProduct {
    OutputProduct {
        id: prefixed_id(PRODUCT_ID_PREFIX),
        name: name.to_string(),
        quantity: Decimal::from(quantity),
        unit: unit.to_string(),
    }
}

//! Dashboard aggregation service

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::types::{LotStatus, RunStatus};

use crate::error::AppResult;
use crate::store::Store;

/// Dashboard service for headline totals and the activity feed
#[derive(Clone)]
pub struct DashboardService {
    store: Store,
}

/// Headline totals shown on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_receipts: usize,
    pub total_inventory_volume: Decimal,
    pub available_volume: Decimal,
    pub in_production_volume: Decimal,
    pub processed_volume: Decimal,
    pub draft_runs: usize,
    pub completed_runs: usize,
    pub unique_reference_ids: usize,
    pub unique_suppliers: usize,
}

/// Kind of event on the activity feed
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Receipt,
    ProductionRun,
}

/// One line on the recent activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub details: String,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Totals across receipts, inventory and runs
    pub fn stats(&self) -> AppResult<DashboardStats> {
        let receipts = self.store.receipts()?;
        let lots = self.store.inventory()?;
        let runs = self.store.production_runs()?;

        Ok(DashboardStats {
            total_receipts: receipts.len(),
            total_inventory_volume: lots.iter().map(|l| l.volume).sum(),
            available_volume: lots
                .iter()
                .filter(|l| l.status == LotStatus::Available)
                .map(|l| l.available_volume)
                .sum(),
            in_production_volume: lots
                .iter()
                .filter(|l| l.status == LotStatus::InProduction)
                .map(|l| l.available_volume)
                .sum(),
            processed_volume: lots
                .iter()
                .filter(|l| l.status == LotStatus::Processed)
                .map(|l| l.volume)
                .sum(),
            draft_runs: runs.iter().filter(|r| r.status == RunStatus::Draft).count(),
            completed_runs: runs
                .iter()
                .filter(|r| r.status == RunStatus::Completed)
                .count(),
            unique_reference_ids: lots
                .iter()
                .map(|l| l.reference_id.as_str())
                .collect::<HashSet<_>>()
                .len(),
            unique_suppliers: lots
                .iter()
                .map(|l| l.supplier_name.as_str())
                .collect::<HashSet<_>>()
                .len(),
        })
    }

    /// Latest receipts and runs merged into one feed, newest first,
    /// capped at ten entries
    pub fn recent_activity(&self) -> AppResult<Vec<ActivityItem>> {
        let mut receipts = self.store.receipts()?;
        receipts.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        let mut runs = self.store.production_runs()?;
        runs.sort_by(|a, b| b.produced_at.cmp(&a.produced_at));

        let mut items: Vec<ActivityItem> = Vec::new();
        for receipt in receipts.iter().take(5) {
            items.push(ActivityItem {
                kind: ActivityKind::Receipt,
                occurred_at: receipt.received_at,
                description: "Ontvangst geregistreerd".to_string(),
                details: format!(
                    "{}m³ {} van {}",
                    receipt.volume, receipt.wood_type, receipt.supplier.name
                ),
            });
        }
        for run in runs.iter().take(5) {
            items.push(ActivityItem {
                kind: ActivityKind::ProductionRun,
                occurred_at: run.produced_at,
                description: "Productierun aangemaakt".to_string(),
                details: format!(
                    "Batch {} - Week {}/{} - {}m³ input",
                    run.batch_number, run.week, run.year, run.input_volume
                ),
            });
        }

        items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        items.truncate(10);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, StoreSnapshot};
    use shared::models::{InventoryLot, ProductionRun, Receipt, Supplier};
    use std::sync::Arc;

    fn receipt(n: u32, age_minutes: i64) -> Receipt {
        Receipt {
            id: format!("ONT-{}", n),
            declaration_number: format!("EUDR-2024-{:03}", n),
            reference_id: format!("TRACES-REF{:06}", n),
            supplier: Supplier {
                name: "Houthandel Jansen".to_string(),
                address: String::new(),
                country: "Nederland".to_string(),
            },
            transport_doc_number: format!("CMR-{}", n),
            certification_number: "PEFC/30-31-123".to_string(),
            wood_type: "Grenen".to_string(),
            volume: Decimal::from(10),
            declared_quantity_on_doc: None,
            received_at: Utc::now() - chrono::Duration::minutes(age_minutes),
            driver_name: String::new(),
        }
    }

    fn lot(n: u32, status: LotStatus) -> InventoryLot {
        InventoryLot {
            id: format!("VRD-{}", n),
            reference_id: format!("TRACES-REF{:06}", n),
            receipt_id: format!("ONT-{}", n),
            wood_type: "Grenen".to_string(),
            volume: Decimal::from(10),
            available_volume: Decimal::from(10),
            supplier_name: "Houthandel Jansen".to_string(),
            received_at: Utc::now(),
            status,
            version: 0,
        }
    }

    fn run(n: u32, status: RunStatus, age_minutes: i64) -> ProductionRun {
        ProductionRun {
            id: format!("RUN-{}", n),
            batch_number: format!("BATCH-2025-W{:02}", n),
            week: n,
            year: 2025,
            consumed_reference_ids: vec![],
            input_volume: Decimal::from(18),
            output_products: None,
            status,
            produced_at: Utc::now() - chrono::Duration::minutes(age_minutes),
            version: 0,
        }
    }

    fn service_with(snapshot: StoreSnapshot) -> DashboardService {
        let store = Store::new(Arc::new(MemoryBackend::new()));
        store.replace_all(snapshot).unwrap();
        DashboardService::new(store)
    }

    #[test]
    fn test_stats_counts_by_status() {
        let service = service_with(StoreSnapshot {
            receipts: vec![receipt(1, 10), receipt(2, 5)],
            inventory: vec![
                lot(1, LotStatus::Available),
                lot(2, LotStatus::InProduction),
                lot(3, LotStatus::Processed),
            ],
            production_runs: vec![
                run(23, RunStatus::Completed, 30),
                run(24, RunStatus::Draft, 20),
            ],
            ..Default::default()
        });

        let stats = service.stats().unwrap();
        assert_eq!(stats.total_receipts, 2);
        assert_eq!(stats.total_inventory_volume, Decimal::from(30));
        assert_eq!(stats.available_volume, Decimal::from(10));
        assert_eq!(stats.in_production_volume, Decimal::from(10));
        assert_eq!(stats.processed_volume, Decimal::from(10));
        assert_eq!(stats.draft_runs, 1);
        assert_eq!(stats.completed_runs, 1);
        assert_eq!(stats.unique_reference_ids, 3);
        assert_eq!(stats.unique_suppliers, 1);
    }

    #[test]
    fn test_activity_merges_newest_first_and_caps_at_ten() {
        let receipts: Vec<Receipt> = (1..=7).map(|n| receipt(n, (n * 2) as i64)).collect();
        let runs: Vec<ProductionRun> = (1..=7)
            .map(|n| run(n, RunStatus::Completed, (n * 2 + 1) as i64))
            .collect();
        let service = service_with(StoreSnapshot {
            receipts,
            production_runs: runs,
            ..Default::default()
        });

        let feed = service.recent_activity().unwrap();
        assert_eq!(feed.len(), 10);
        assert!(feed.windows(2).all(|w| w[0].occurred_at >= w[1].occurred_at));
        assert!(matches!(feed[0].kind, ActivityKind::Receipt));
        assert!(feed[0].details.contains("Grenen"));
    }

    #[test]
    fn test_activity_details_describe_the_event() {
        let service = service_with(StoreSnapshot {
            receipts: vec![receipt(1, 10)],
            production_runs: vec![run(24, RunStatus::Completed, 5)],
            ..Default::default()
        });

        let feed = service.recent_activity().unwrap();
        assert_eq!(feed.len(), 2);
        let run_item = feed
            .iter()
            .find(|i| matches!(i.kind, ActivityKind::ProductionRun))
            .unwrap();
        assert!(run_item.details.contains("BATCH-2025-W24"));
        assert!(run_item.details.contains("Week 24/2025"));
    }
}

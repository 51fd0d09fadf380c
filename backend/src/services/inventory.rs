//! Inventory ledger service

use std::collections::HashSet;

use serde::Deserialize;

use shared::models::{InventoryLot, InventorySummary};
use shared::types::LotStatus;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Inventory service for lot listings and ledger totals
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
}

/// Filters for listing inventory lots
#[derive(Debug, Default, Deserialize)]
pub struct LotFilter {
    /// Exact status; when unset, processed lots are hidden
    pub status: Option<String>,
    pub wood_type: Option<String>,
    /// One of "received_at" (default), "volume", "supplier", "wood_type"
    pub sort_by: Option<String>,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List lots; processed lots stay hidden unless asked for explicitly
    pub fn list_lots(&self, filter: LotFilter) -> AppResult<Vec<InventoryLot>> {
        let status = match filter.status.as_deref() {
            Some(raw) => Some(LotStatus::parse(raw).ok_or_else(|| AppError::Validation {
                field: "status".to_string(),
                message: format!("Unknown lot status '{}'", raw),
                message_nl: format!("Onbekende voorraadstatus '{}'", raw),
            })?),
            None => None,
        };

        let mut lots: Vec<InventoryLot> = self
            .store
            .inventory()?
            .into_iter()
            .filter(|lot| match status {
                Some(wanted) => lot.status == wanted,
                None => lot.status != LotStatus::Processed,
            })
            .filter(|lot| match &filter.wood_type {
                Some(wood_type) => lot.wood_type.eq_ignore_ascii_case(wood_type),
                None => true,
            })
            .collect();

        match filter.sort_by.as_deref() {
            Some("volume") => lots.sort_by(|a, b| b.available_volume.cmp(&a.available_volume)),
            Some("supplier") => lots.sort_by(|a, b| a.supplier_name.cmp(&b.supplier_name)),
            Some("wood_type") => lots.sort_by(|a, b| a.wood_type.cmp(&b.wood_type)),
            _ => lots.sort_by(|a, b| b.received_at.cmp(&a.received_at)),
        }

        Ok(lots)
    }

    /// Volume totals and distinct tallies over the whole ledger
    pub fn summary(&self) -> AppResult<InventorySummary> {
        let lots = self.store.inventory()?;

        let available_volume = lots
            .iter()
            .filter(|l| l.status == LotStatus::Available)
            .map(|l| l.available_volume)
            .sum();
        let in_production_volume = lots
            .iter()
            .filter(|l| l.status == LotStatus::InProduction)
            .map(|l| l.available_volume)
            .sum();
        let processed_volume = lots
            .iter()
            .filter(|l| l.status == LotStatus::Processed)
            .map(|l| l.volume)
            .sum();
        let unprocessed_volume = lots
            .iter()
            .filter(|l| l.status != LotStatus::Processed)
            .map(|l| l.volume)
            .sum();

        let unique_suppliers = lots
            .iter()
            .map(|l| l.supplier_name.as_str())
            .collect::<HashSet<_>>()
            .len();
        let unique_wood_types = lots
            .iter()
            .map(|l| l.wood_type.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(InventorySummary {
            total_volume: lots.iter().map(|l| l.volume).sum(),
            available_volume,
            in_production_volume,
            processed_volume,
            unprocessed_volume,
            lot_count: lots.len(),
            unique_suppliers,
            unique_wood_types,
        })
    }

    /// Flag lots as consumed by production; unknown references are ignored
    pub fn mark_processed(&self, reference_ids: &[String]) -> AppResult<usize> {
        self.store.mark_lots_processed(reference_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn lot(reference: &str, wood: &str, volume: i64, status: LotStatus, age_hours: i64) -> InventoryLot {
        let volume = Decimal::from(volume);
        InventoryLot {
            id: format!("VRD-{}", reference),
            reference_id: reference.to_string(),
            receipt_id: format!("ONT-{}", reference),
            wood_type: wood.to_string(),
            volume,
            available_volume: volume,
            supplier_name: format!("Leverancier {}", wood),
            received_at: Utc::now() - Duration::hours(age_hours),
            status,
            version: 0,
        }
    }

    fn seeded_service() -> InventoryService {
        let store = Store::new(Arc::new(MemoryBackend::new()));
        let service = InventoryService::new(store.clone());
        store
            .replace_all(crate::store::StoreSnapshot {
                inventory: vec![
                    lot("TRACES-AAA111AAA", "Grenen", 10, LotStatus::Available, 3),
                    lot("TRACES-BBB222BBB", "Eikenhout", 20, LotStatus::Available, 1),
                    lot("TRACES-CCC333CCC", "Grenen", 5, LotStatus::InProduction, 2),
                    lot("TRACES-DDD444DDD", "Beukenhout", 8, LotStatus::Processed, 4),
                ],
                ..Default::default()
            })
            .unwrap();
        service
    }

    #[test]
    fn test_default_listing_hides_processed_lots() {
        let service = seeded_service();
        let lots = service.list_lots(LotFilter::default()).unwrap();
        assert_eq!(lots.len(), 3);
        assert!(lots.iter().all(|l| l.status != LotStatus::Processed));
        // Newest first
        assert_eq!(lots[0].reference_id, "TRACES-BBB222BBB");
    }

    #[test]
    fn test_status_filter_shows_only_that_status() {
        let service = seeded_service();
        let lots = service
            .list_lots(LotFilter {
                status: Some("processed".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].reference_id, "TRACES-DDD444DDD");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let service = seeded_service();
        let result = service.list_lots(LotFilter {
            status: Some("melted".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_wood_type_filter_is_case_insensitive() {
        let service = seeded_service();
        let lots = service
            .list_lots(LotFilter {
                wood_type: Some("grenen".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(lots.len(), 2);
        assert!(lots.iter().all(|l| l.wood_type == "Grenen"));
    }

    #[test]
    fn test_sort_by_volume_descending() {
        let service = seeded_service();
        let lots = service
            .list_lots(LotFilter {
                sort_by: Some("volume".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(lots[0].available_volume, Decimal::from(20));
        assert_eq!(lots[2].available_volume, Decimal::from(5));
    }

    #[test]
    fn test_summary_totals() {
        let service = seeded_service();
        let summary = service.summary().unwrap();

        assert_eq!(summary.total_volume, Decimal::from(43));
        assert_eq!(summary.available_volume, Decimal::from(30));
        assert_eq!(summary.in_production_volume, Decimal::from(5));
        assert_eq!(summary.processed_volume, Decimal::from(8));
        assert_eq!(summary.unprocessed_volume, Decimal::from(35));
        assert_eq!(summary.lot_count, 4);
        assert_eq!(summary.unique_suppliers, 3);
        assert_eq!(summary.unique_wood_types, 3);
    }

    #[test]
    fn test_mark_processed_skips_unknown_and_already_processed() {
        let service = seeded_service();
        let marked = service
            .mark_processed(&[
                "TRACES-AAA111AAA".to_string(),
                "TRACES-DDD444DDD".to_string(),
                "TRACES-MISSING00".to_string(),
            ])
            .unwrap();
        assert_eq!(marked, 1);

        let remaining = service.list_lots(LotFilter::default()).unwrap();
        assert_eq!(remaining.len(), 2);
    }
}

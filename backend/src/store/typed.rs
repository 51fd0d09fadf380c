//! Typed store facade over the storage backends

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use shared::models::{InventoryLot, PreadviceEntry, ProducedProduct, ProductionRun, Receipt};
use shared::types::LotStatus;

use super::{collections, StorageBackend};
use crate::error::{AppError, AppResult};

/// Typed access to the stored collections
///
/// Every mutating operation runs its whole read-modify-write cycle under
/// one process-wide lock, and multi-collection commits reach the backend
/// as a single `write_collections` call. Lots and runs carry a version
/// counter; commits verify the version the caller read before consuming
/// or replacing a row, so stale writers get a conflict instead of
/// silently overwriting newer data.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
}

/// Full dataset written in one commit by the demo seeder
#[derive(Default)]
pub struct StoreSnapshot {
    pub preadvice: Vec<PreadviceEntry>,
    pub receipts: Vec<Receipt>,
    pub inventory: Vec<InventoryLot>,
    pub production_runs: Vec<ProductionRun>,
    pub produced_products: Vec<ProducedProduct>,
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn preadvice(&self) -> AppResult<Vec<PreadviceEntry>> {
        self.read(collections::PREADVICE)
    }

    pub fn receipts(&self) -> AppResult<Vec<Receipt>> {
        self.read(collections::RECEIPTS)
    }

    pub fn inventory(&self) -> AppResult<Vec<InventoryLot>> {
        self.read(collections::INVENTORY)
    }

    pub fn production_runs(&self) -> AppResult<Vec<ProductionRun>> {
        self.read(collections::PRODUCTION_RUNS)
    }

    pub fn produced_products(&self) -> AppResult<Vec<ProducedProduct>> {
        self.read(collections::PRODUCED_PRODUCTS)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    pub fn append_preadvice(&self, entry: PreadviceEntry) -> AppResult<PreadviceEntry> {
        let _guard = self.lock()?;
        let mut rows: Vec<PreadviceEntry> = self.read(collections::PREADVICE)?;
        rows.push(entry.clone());
        self.write(collections::PREADVICE, &rows)?;
        Ok(entry)
    }

    /// Appends a run without touching any other collection; drafts only
    pub fn append_run(&self, run: ProductionRun) -> AppResult<ProductionRun> {
        let _guard = self.lock()?;
        let mut rows: Vec<ProductionRun> = self.read(collections::PRODUCTION_RUNS)?;
        rows.push(run.clone());
        self.write(collections::PRODUCTION_RUNS, &rows)?;
        Ok(run)
    }

    /// Marks matching lots as processed; unknown references are ignored
    pub fn mark_lots_processed(&self, reference_ids: &[String]) -> AppResult<usize> {
        let _guard = self.lock()?;
        let mut lots: Vec<InventoryLot> = self.read(collections::INVENTORY)?;
        let mut marked = 0;
        for lot in lots.iter_mut() {
            if reference_ids.contains(&lot.reference_id) && lot.status != LotStatus::Processed {
                lot.status = LotStatus::Processed;
                lot.version += 1;
                marked += 1;
            }
        }
        if marked > 0 {
            self.write(collections::INVENTORY, &lots)?;
        }
        Ok(marked)
    }

    /// Registers a receipt together with its derived lot and drops the
    /// preadvice entries the given matcher reconciles against it
    ///
    /// Returns the number of preadvice entries removed.
    pub fn commit_receipt<F>(
        &self,
        receipt: Receipt,
        lot: InventoryLot,
        matches_preadvice: F,
    ) -> AppResult<usize>
    where
        F: Fn(&PreadviceEntry) -> bool,
    {
        let _guard = self.lock()?;
        let mut receipts: Vec<Receipt> = self.read(collections::RECEIPTS)?;
        let mut lots: Vec<InventoryLot> = self.read(collections::INVENTORY)?;
        let mut preadvice: Vec<PreadviceEntry> = self.read(collections::PREADVICE)?;

        let before = preadvice.len();
        preadvice.retain(|entry| !matches_preadvice(entry));
        let removed = before - preadvice.len();

        receipts.push(receipt);
        lots.push(lot);

        self.backend.write_collections(vec![
            self.staged(collections::RECEIPTS, &receipts)?,
            self.staged(collections::INVENTORY, &lots)?,
            self.staged(collections::PREADVICE, &preadvice)?,
        ])?;

        Ok(removed)
    }

    /// Appends a completed run, consuming the referenced lots and writing
    /// the produced product rows in the same commit
    ///
    /// `consumed` pairs each lot's registry reference with the version the
    /// caller read; a mismatch means another request touched the lot first.
    /// `check_runs` re-validates the run list under the lock.
    pub fn commit_run<F>(
        &self,
        run: ProductionRun,
        consumed: &[(String, u64)],
        produced: Vec<ProducedProduct>,
        check_runs: F,
    ) -> AppResult<ProductionRun>
    where
        F: FnOnce(&[ProductionRun]) -> AppResult<()>,
    {
        let _guard = self.lock()?;
        let mut runs: Vec<ProductionRun> = self.read(collections::PRODUCTION_RUNS)?;
        check_runs(&runs)?;

        let mut lots: Vec<InventoryLot> = self.read(collections::INVENTORY)?;
        consume_lots(&mut lots, consumed)?;

        let mut produced_rows: Vec<ProducedProduct> = self.read(collections::PRODUCED_PRODUCTS)?;
        produced_rows.extend(produced);
        runs.push(run.clone());

        self.backend.write_collections(vec![
            self.staged(collections::PRODUCTION_RUNS, &runs)?,
            self.staged(collections::INVENTORY, &lots)?,
            self.staged(collections::PRODUCED_PRODUCTS, &produced_rows)?,
        ])?;

        Ok(run)
    }

    /// Replaces a draft run with its finalized form, consuming lots and
    /// writing produced product rows in the same commit
    pub fn commit_draft_finalize<F>(
        &self,
        expected_version: u64,
        finalized: ProductionRun,
        consumed: &[(String, u64)],
        produced: Vec<ProducedProduct>,
        check_runs: F,
    ) -> AppResult<ProductionRun>
    where
        F: FnOnce(&[ProductionRun]) -> AppResult<()>,
    {
        let _guard = self.lock()?;
        let mut runs: Vec<ProductionRun> = self.read(collections::PRODUCTION_RUNS)?;
        check_runs(&runs)?;

        let slot = runs
            .iter_mut()
            .find(|r| r.id == finalized.id)
            .ok_or_else(|| AppError::NotFound("Production run".to_string()))?;
        if slot.version != expected_version {
            return Err(AppError::Conflict {
                resource: "production_run".to_string(),
                message: "Production run was modified by another request".to_string(),
                message_nl: "Productierun is door een ander verzoek gewijzigd".to_string(),
            });
        }
        *slot = finalized.clone();

        let mut lots: Vec<InventoryLot> = self.read(collections::INVENTORY)?;
        consume_lots(&mut lots, consumed)?;

        let mut produced_rows: Vec<ProducedProduct> = self.read(collections::PRODUCED_PRODUCTS)?;
        produced_rows.extend(produced);

        self.backend.write_collections(vec![
            self.staged(collections::PRODUCTION_RUNS, &runs)?,
            self.staged(collections::INVENTORY, &lots)?,
            self.staged(collections::PRODUCED_PRODUCTS, &produced_rows)?,
        ])?;

        Ok(finalized)
    }

    /// Replaces every collection in one commit; used by the demo seeder
    pub fn replace_all(&self, snapshot: StoreSnapshot) -> AppResult<()> {
        let _guard = self.lock()?;
        self.backend.write_collections(vec![
            self.staged(collections::PREADVICE, &snapshot.preadvice)?,
            self.staged(collections::RECEIPTS, &snapshot.receipts)?,
            self.staged(collections::INVENTORY, &snapshot.inventory)?,
            self.staged(collections::PRODUCTION_RUNS, &snapshot.production_runs)?,
            self.staged(collections::PRODUCED_PRODUCTS, &snapshot.produced_products)?,
        ])
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn lock(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::Internal("store write lock poisoned".to_string()))
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> AppResult<Vec<T>> {
        let rows = self.backend.read_collection(name)?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    AppError::StorageError(format!("corrupt row in collection {}: {}", name, e))
                })
            })
            .collect()
    }

    fn write<T: Serialize>(&self, name: &str, items: &[T]) -> AppResult<()> {
        let (name, rows) = self.staged(name, items)?;
        self.backend.write_collection(&name, rows)
    }

    fn staged<T: Serialize>(&self, name: &str, items: &[T]) -> AppResult<(String, Vec<Value>)> {
        let rows = items
            .iter()
            .map(|item| {
                serde_json::to_value(item).map_err(|e| {
                    AppError::StorageError(format!(
                        "cannot serialize row for collection {}: {}",
                        name, e
                    ))
                })
            })
            .collect::<AppResult<Vec<Value>>>()?;
        Ok((name.to_string(), rows))
    }
}

/// Flips the referenced lots to processed after verifying their versions
fn consume_lots(lots: &mut [InventoryLot], consumed: &[(String, u64)]) -> AppResult<()> {
    for (reference_id, expected_version) in consumed {
        let lot = lots
            .iter_mut()
            .find(|l| l.reference_id == *reference_id)
            .ok_or_else(|| AppError::NotFound(format!("Inventory lot {}", reference_id)))?;
        if lot.version != *expected_version {
            return Err(AppError::Conflict {
                resource: "inventory_lot".to_string(),
                message: format!("Lot {} was modified by another request", reference_id),
                message_nl: format!("Vracht {} is door een ander verzoek gewijzigd", reference_id),
            });
        }
        lot.status = LotStatus::Processed;
        lot.version += 1;
    }
    Ok(())
}

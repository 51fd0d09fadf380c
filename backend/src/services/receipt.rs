//! Goods receipt registration service
//!
//! Registers physical arrivals at the yard, derives an inventory lot from
//! each receipt and reconciles matching preadvice away.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{InventoryLot, PreadviceEntry, Receipt, Supplier};
use shared::types::{prefixed_id, LotStatus, LOT_ID_PREFIX, RECEIPT_ID_PREFIX};
use shared::validation::{validate_positive_quantity, validate_required_text};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Receipt service for goods arrivals
#[derive(Clone)]
pub struct ReceiptService {
    store: Store,
}

/// Input for registering a goods receipt
#[derive(Debug, Deserialize)]
pub struct RegisterReceiptInput {
    pub declaration_number: String,
    pub reference_id: String,
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_address: String,
    #[serde(default)]
    pub supplier_country: String,
    pub transport_doc_number: String,
    pub certification_number: String,
    pub wood_type: String,
    /// Measured volume in cubic meters
    pub volume: Decimal,
    /// Quantity printed on the transport document, if it differs
    pub declared_quantity_on_doc: Option<Decimal>,
    #[serde(default)]
    pub driver_name: String,
}

/// A registered receipt together with the lot it put into stock
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredReceipt {
    pub receipt: Receipt,
    pub lot: InventoryLot,
    /// Preadvice entries reconciled away by this arrival
    pub reconciled_preadvice: usize,
}

impl ReceiptService {
    /// Create a new ReceiptService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a physical arrival and put the derived lot into stock
    pub fn register(&self, input: RegisterReceiptInput) -> AppResult<RegisteredReceipt> {
        if validate_required_text(&input.declaration_number).is_err() {
            return Err(required("declaration_number", "Declaration number is required", "EUDR-nummer is verplicht"));
        }
        if validate_required_text(&input.reference_id).is_err() {
            return Err(required("reference_id", "Reference id is required", "TRACES-ID is verplicht"));
        }
        if validate_required_text(&input.supplier_name).is_err() {
            return Err(required("supplier_name", "Supplier name is required", "Leveranciersnaam is verplicht"));
        }
        if validate_required_text(&input.transport_doc_number).is_err() {
            return Err(required("transport_doc_number", "Transport document number is required", "CMR-nummer is verplicht"));
        }
        if validate_required_text(&input.certification_number).is_err() {
            return Err(required("certification_number", "Certification number is required", "PEFC-nummer is verplicht"));
        }
        if validate_required_text(&input.wood_type).is_err() {
            return Err(required("wood_type", "Wood type is required", "Houtsoort is verplicht"));
        }
        if validate_positive_quantity(input.volume).is_err() {
            return Err(AppError::Validation {
                field: "volume".to_string(),
                message: "Volume must be greater than zero".to_string(),
                message_nl: "Volume moet groter zijn dan nul".to_string(),
            });
        }

        let received_at = Utc::now();
        let receipt = Receipt {
            id: prefixed_id(RECEIPT_ID_PREFIX),
            declaration_number: input.declaration_number.trim().to_string(),
            reference_id: input.reference_id.trim().to_string(),
            supplier: Supplier {
                name: input.supplier_name.trim().to_string(),
                address: input.supplier_address.trim().to_string(),
                country: input.supplier_country.trim().to_string(),
            },
            transport_doc_number: input.transport_doc_number.trim().to_string(),
            certification_number: input.certification_number.trim().to_string(),
            wood_type: input.wood_type.trim().to_string(),
            volume: input.volume,
            declared_quantity_on_doc: input.declared_quantity_on_doc,
            received_at,
            driver_name: input.driver_name.trim().to_string(),
        };

        // The lot carries the full received volume until production consumes it
        let lot = InventoryLot {
            id: prefixed_id(LOT_ID_PREFIX),
            reference_id: receipt.reference_id.clone(),
            receipt_id: receipt.id.clone(),
            wood_type: receipt.wood_type.clone(),
            volume: receipt.volume,
            available_volume: receipt.volume,
            supplier_name: receipt.supplier.name.clone(),
            received_at,
            status: LotStatus::Available,
            version: 0,
        };

        let announced = receipt.clone();
        let reconciled = self
            .store
            .commit_receipt(receipt.clone(), lot.clone(), move |entry| {
                matches_receipt(entry, &announced)
            })?;

        Ok(RegisteredReceipt {
            receipt,
            lot,
            reconciled_preadvice: reconciled,
        })
    }

    /// All receipts, newest first
    pub fn list(&self) -> AppResult<Vec<Receipt>> {
        let mut receipts = self.store.receipts()?;
        receipts.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        Ok(receipts)
    }
}

/// Whether a stored preadvice entry announced the shipment this receipt
/// registers: match on transport document, declaration or registry
/// reference, skipping fields that are empty on either side
pub fn matches_receipt(entry: &PreadviceEntry, receipt: &Receipt) -> bool {
    let same_transport_doc = !entry.transport_doc_number.is_empty()
        && !receipt.transport_doc_number.is_empty()
        && entry.transport_doc_number == receipt.transport_doc_number;
    let same_declaration = !entry.declaration_number.is_empty()
        && !receipt.declaration_number.is_empty()
        && entry.declaration_number == receipt.declaration_number;
    let same_reference = !entry.reference_id.is_empty()
        && !receipt.reference_id.is_empty()
        && entry.reference_id == receipt.reference_id;

    same_transport_doc || same_declaration || same_reference
}

fn required(field: &str, message: &str, message_nl: &str) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
        message_nl: message_nl.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use std::sync::Arc;

    fn test_store() -> Store {
        Store::new(Arc::new(MemoryBackend::new()))
    }

    fn test_input() -> RegisterReceiptInput {
        RegisterReceiptInput {
            declaration_number: "EUDR-2024-001".to_string(),
            reference_id: "TRACES-ABC123XYZ".to_string(),
            supplier_name: "Houthandel Jansen".to_string(),
            supplier_address: "Bosweg 12, Epe".to_string(),
            supplier_country: "Nederland".to_string(),
            transport_doc_number: "CMR-2025-0042".to_string(),
            certification_number: "PEFC/30-31-123".to_string(),
            wood_type: "Grenen".to_string(),
            volume: Decimal::from(25),
            declared_quantity_on_doc: Some(Decimal::from(25)),
            driver_name: "P. de Vries".to_string(),
        }
    }

    fn preadvice_entry(declaration: &str, cmr: &str, reference: &str) -> PreadviceEntry {
        PreadviceEntry {
            id: "AANM-1".to_string(),
            declaration_number: declaration.to_string(),
            transport_doc_number: cmr.to_string(),
            declared_quantity: Decimal::from(25),
            reference_id: reference.to_string(),
            is_valid: true,
            origin_country: "Duitsland".to_string(),
            validated_at: Utc::now(),
        }
    }

    #[test]
    fn test_register_derives_lot_from_receipt() {
        let service = ReceiptService::new(test_store());
        let registered = service.register(test_input()).unwrap();

        assert!(registered.receipt.id.starts_with("ONT-"));
        assert!(registered.lot.id.starts_with("VRD-"));
        assert_eq!(registered.lot.receipt_id, registered.receipt.id);
        assert_eq!(registered.lot.reference_id, "TRACES-ABC123XYZ");
        assert_eq!(registered.lot.wood_type, "Grenen");
        assert_eq!(registered.lot.volume, Decimal::from(25));
        assert_eq!(registered.lot.available_volume, Decimal::from(25));
        assert_eq!(registered.lot.supplier_name, "Houthandel Jansen");
        assert_eq!(registered.lot.status, LotStatus::Available);
    }

    #[test]
    fn test_register_requires_core_fields() {
        let service = ReceiptService::new(test_store());

        let mut input = test_input();
        input.supplier_name = "  ".to_string();
        assert!(matches!(service.register(input), Err(AppError::Validation { .. })));

        let mut input = test_input();
        input.wood_type = String::new();
        assert!(matches!(service.register(input), Err(AppError::Validation { .. })));

        let mut input = test_input();
        input.volume = Decimal::ZERO;
        assert!(matches!(service.register(input), Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_register_allows_optional_fields_empty() {
        let service = ReceiptService::new(test_store());
        let mut input = test_input();
        input.supplier_address = String::new();
        input.supplier_country = String::new();
        input.driver_name = String::new();
        input.declared_quantity_on_doc = None;

        let registered = service.register(input).unwrap();
        assert!(registered.receipt.driver_name.is_empty());
        assert!(registered.receipt.declared_quantity_on_doc.is_none());
    }

    #[test]
    fn test_register_reconciles_preadvice_on_any_key() {
        let store = test_store();
        let service = ReceiptService::new(store.clone());

        store
            .append_preadvice(preadvice_entry("EUDR-2024-001", "CMR-OTHER", "TRACES-OTHER1234"))
            .unwrap();
        store
            .append_preadvice(preadvice_entry("EUDR-2024-999", "CMR-2025-0042", "TRACES-OTHER5678"))
            .unwrap();
        store
            .append_preadvice(preadvice_entry("EUDR-2024-998", "CMR-OTHER", "TRACES-ABC123XYZ"))
            .unwrap();
        store
            .append_preadvice(preadvice_entry("EUDR-2024-997", "CMR-UNRELATED", "TRACES-ZZZ999ZZZ"))
            .unwrap();

        let registered = service.register(test_input()).unwrap();
        assert_eq!(registered.reconciled_preadvice, 3);

        let remaining = store.preadvice().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].declaration_number, "EUDR-2024-997");
    }

    #[test]
    fn test_empty_fields_never_match() {
        let entry = preadvice_entry("", "", "");
        let service = ReceiptService::new(test_store());
        let registered = service.register(test_input()).unwrap();
        assert!(!matches_receipt(&entry, &registered.receipt));
    }

    #[test]
    fn test_list_returns_newest_first() {
        let service = ReceiptService::new(test_store());
        service.register(test_input()).unwrap();

        let mut second = test_input();
        second.declaration_number = "EUDR-2024-002".to_string();
        service.register(second).unwrap();

        let receipts = service.list().unwrap();
        assert_eq!(receipts.len(), 2);
        assert!(receipts[0].received_at >= receipts[1].received_at);
        assert_eq!(receipts[0].declaration_number, "EUDR-2024-002");
    }

    #[test]
    fn test_duplicate_reference_ids_are_allowed() {
        let service = ReceiptService::new(test_store());
        service.register(test_input()).unwrap();
        let registered = service.register(test_input()).unwrap();
        assert_eq!(registered.lot.reference_id, "TRACES-ABC123XYZ");
        assert_eq!(service.list().unwrap().len(), 2);
    }
}

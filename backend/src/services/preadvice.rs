//! Shipment declaration validation service
//!
//! Validates inbound EUDR declarations against the TRACES registry and
//! keeps the resulting preadvice entries until the goods arrive.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::PreadviceEntry;
use shared::types::{prefixed_id, PREADVICE_ID_PREFIX};
use shared::validation::{validate_positive_quantity, validate_required_text};

use crate::error::{AppError, AppResult};
use crate::external::TracesClient;
use crate::store::Store;

/// Preadvice service for declaration validation and pending announcements
#[derive(Clone)]
pub struct PreadviceService {
    store: Store,
    traces: TracesClient,
}

/// Input for validating a shipment declaration
#[derive(Debug, Deserialize)]
pub struct ValidateDeclarationInput {
    pub declaration_number: String,
    pub transport_doc_number: String,
    /// Announced quantity in steres
    pub declared_quantity: Decimal,
}

/// Outcome of a declaration validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub origin_country: String,
    pub origin_region: String,
    pub certification_scheme: String,
    /// Only minted for declarations the registry approves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preadvice: Option<PreadviceEntry>,
}

impl PreadviceService {
    /// Create a new PreadviceService instance
    pub fn new(store: Store, traces: TracesClient) -> Self {
        Self { store, traces }
    }

    /// Validate a declaration against the registry
    ///
    /// An approved declaration gets a freshly minted reference id and a
    /// stored preadvice entry. Unknown or rejected declarations store
    /// nothing and return no reference id.
    pub async fn validate(&self, input: ValidateDeclarationInput) -> AppResult<ValidationOutcome> {
        if validate_required_text(&input.declaration_number).is_err() {
            return Err(AppError::Validation {
                field: "declaration_number".to_string(),
                message: "Declaration number is required".to_string(),
                message_nl: "EUDR-nummer is verplicht".to_string(),
            });
        }
        if validate_required_text(&input.transport_doc_number).is_err() {
            return Err(AppError::Validation {
                field: "transport_doc_number".to_string(),
                message: "Transport document number is required".to_string(),
                message_nl: "CMR-nummer is verplicht".to_string(),
            });
        }
        if validate_positive_quantity(input.declared_quantity).is_err() {
            return Err(AppError::Validation {
                field: "declared_quantity".to_string(),
                message: "Declared quantity must be greater than zero".to_string(),
                message_nl: "Aantal steres moet groter zijn dan nul".to_string(),
            });
        }

        let declaration_number = input.declaration_number.trim().to_string();
        let record = match self.traces.lookup(&declaration_number).await? {
            Some(record) => record,
            None => {
                // Unknown to the registry
                return Ok(ValidationOutcome {
                    is_valid: false,
                    origin_country: "Onbekend".to_string(),
                    origin_region: String::new(),
                    certification_scheme: String::new(),
                    reference_id: None,
                    preadvice: None,
                });
            }
        };

        if !record.valid {
            return Ok(ValidationOutcome {
                is_valid: false,
                origin_country: record.country,
                origin_region: record.region,
                certification_scheme: record.certification,
                reference_id: None,
                preadvice: None,
            });
        }

        let reference_id = self.traces.mint_reference_id();
        let entry = self.store.append_preadvice(PreadviceEntry {
            id: prefixed_id(PREADVICE_ID_PREFIX),
            declaration_number,
            transport_doc_number: input.transport_doc_number.trim().to_string(),
            declared_quantity: input.declared_quantity,
            reference_id: reference_id.clone(),
            is_valid: true,
            origin_country: record.country.clone(),
            validated_at: Utc::now(),
        })?;

        Ok(ValidationOutcome {
            is_valid: true,
            origin_country: record.country,
            origin_region: record.region,
            certification_scheme: record.certification,
            reference_id: Some(reference_id),
            preadvice: Some(entry),
        })
    }

    /// Valid announcements with no matching goods receipt yet
    pub fn list_pending(&self) -> AppResult<Vec<PreadviceEntry>> {
        let preadvice = self.store.preadvice()?;
        let receipts = self.store.receipts()?;

        Ok(preadvice
            .into_iter()
            .filter(|entry| {
                entry.is_valid
                    && !receipts.iter().any(|receipt| {
                        !entry.transport_doc_number.is_empty()
                            && receipt.transport_doc_number == entry.transport_doc_number
                    })
            })
            .collect())
    }
}

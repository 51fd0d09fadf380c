//! Preadvice models
//!
//! A preadvice entry is created when an inbound shipment declaration passes
//! validation against the EU deforestation registry, before the goods arrive.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated shipment announcement awaiting physical receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreadviceEntry {
    pub id: String,
    /// EUDR shipment declaration number (EUDR-YYYY-NNN)
    pub declaration_number: String,
    /// CMR transport document number
    pub transport_doc_number: String,
    /// Declared quantity in steres (stacked cubic metres)
    pub declared_quantity: Decimal,
    /// Registry reference issued at validation time (TRACES-XXXXXXXXX)
    pub reference_id: String,
    pub is_valid: bool,
    pub origin_country: String,
    pub validated_at: DateTime<Utc>,
}

//! Goods receipt models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier details captured on a goods receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub address: String,
    pub country: String,
}

/// A registered physical arrival of wood at the yard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub declaration_number: String,
    pub reference_id: String,
    pub supplier: Supplier,
    pub transport_doc_number: String,
    /// PEFC chain-of-custody certificate number
    pub certification_number: String,
    pub wood_type: String,
    /// Measured volume in cubic metres
    pub volume: Decimal,
    /// Quantity stated on the transport document, if it was recorded
    pub declared_quantity_on_doc: Option<Decimal>,
    pub received_at: DateTime<Utc>,
    pub driver_name: String,
}

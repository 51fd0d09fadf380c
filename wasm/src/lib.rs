//! WebAssembly module for Wood Traceability Platform
//!
//! Provides client-side computation for:
//! - Production week numbering and batch numbers
//! - Week planning options
//! - Yield percentage calculations
//! - Offline paperwork format validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Production week number for a calendar date
///
/// Weeks are counted as elapsed seven-day blocks since January 1st,
/// so January 1st itself is week 0 and January 2nd starts week 1.
#[wasm_bindgen]
pub fn production_week_number(year: i32, month: u32, day: u32) -> Result<u32, JsValue> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| JsValue::from_str("Invalid calendar date"))?;
    Ok(shared::production_week(date))
}

/// Batch number for a production week, e.g. BATCH-2025-W07
#[wasm_bindgen]
pub fn production_batch_number(week: u32, year: i32) -> String {
    shared::batch_number(week, year)
}

/// Selectable production weeks around a date, as a JSON array
///
/// Mirrors the planning window the server offers: ten weeks back through
/// two weeks ahead, so the planning screen works without a connection.
#[wasm_bindgen]
pub fn production_week_options(year: i32, month: u32, day: u32) -> Result<String, JsValue> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| JsValue::from_str("Invalid calendar date"))?;
    serde_json::to_string(&shared::week_options(date))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// First and last day of a production week, as a JSON object
#[wasm_bindgen]
pub fn production_week_range(week: u32, year: i32) -> String {
    let (starts_on, ends_on) = shared::week_date_range(week, year);
    serde_json::json!({ "starts_on": starts_on, "ends_on": ends_on }).to_string()
}

/// Calculate output volume as a percentage of input volume
#[wasm_bindgen]
pub fn calculate_efficiency_percent(total_input: f64, total_output: f64) -> f64 {
    let input = Decimal::try_from(total_input).unwrap_or(Decimal::ZERO);
    let output = Decimal::try_from(total_output).unwrap_or(Decimal::ZERO);

    let percent = shared::efficiency_percent(input, output);
    percent.to_string().parse().unwrap_or(0.0)
}

/// Calculate a part as a percentage of a whole
#[wasm_bindgen]
pub fn calculate_share_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Check an EUDR shipment declaration number (EUDR-YYYY-NNN)
#[wasm_bindgen]
pub fn is_valid_declaration_number(declaration_number: &str) -> bool {
    validate_declaration_number(declaration_number).is_ok()
}

/// Check a registry reference identifier (TRACES- plus 9 characters)
#[wasm_bindgen]
pub fn is_valid_reference_id(reference_id: &str) -> bool {
    validate_reference_id(reference_id).is_ok()
}

/// Check a production batch number (BATCH-YYYY-WNN)
#[wasm_bindgen]
pub fn is_valid_batch_number(batch_number: &str) -> bool {
    validate_batch_number(batch_number).is_ok()
}

/// Check a wood type against the known assortments (case insensitive)
#[wasm_bindgen]
pub fn is_valid_wood_type(wood_type: &str) -> bool {
    is_known_wood_type(wood_type)
}

/// Check that a required form field has non-whitespace content
#[wasm_bindgen]
pub fn has_required_text(value: &str) -> bool {
    validate_required_text(value).is_ok()
}

/// Known wood assortments as a JSON array, for dropdowns
#[wasm_bindgen]
pub fn wood_type_options() -> String {
    serde_json::to_string(WOOD_TYPES).unwrap_or_else(|_| "[]".to_string())
}

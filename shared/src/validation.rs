//! Validation utilities for the Wood Traceability Platform
//!
//! Includes format checks for the EUDR declaration and registry reference
//! numbers used on inbound shipment paperwork.

use rust_decimal::Decimal;

// ============================================================================
// Registry Document Format Validations
// ============================================================================

/// Validate EUDR shipment declaration number format
/// Format: EUDR-YYYY-NNN (e.g., EUDR-2024-001)
pub fn validate_declaration_number(declaration_number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = declaration_number.split('-').collect();

    if parts.len() != 3 {
        return Err("Declaration number must be in format EUDR-YYYY-NNN");
    }

    if parts[0] != "EUDR" {
        return Err("Declaration number must start with 'EUDR'");
    }

    // Validate year
    if parts[1].len() != 4 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid year in declaration number");
    }

    // Validate sequence number
    if parts[2].len() != 3 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid sequence number in declaration number");
    }

    Ok(())
}

/// Validate registry reference identifier format
/// Format: TRACES- followed by 9 uppercase alphanumeric characters
pub fn validate_reference_id(reference_id: &str) -> Result<(), &'static str> {
    let suffix = match reference_id.strip_prefix("TRACES-") {
        Some(s) => s,
        None => return Err("Reference id must start with 'TRACES-'"),
    };

    if suffix.len() != 9 {
        return Err("Reference id must have 9 characters after the prefix");
    }
    if !suffix
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err("Reference id must be uppercase alphanumeric only");
    }

    Ok(())
}

/// Validate production batch number format
/// Format: BATCH-YYYY-WNN (e.g., BATCH-2025-W07)
pub fn validate_batch_number(batch_number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = batch_number.split('-').collect();

    if parts.len() != 3 {
        return Err("Batch number must be in format BATCH-YYYY-WNN");
    }

    if parts[0] != "BATCH" {
        return Err("Batch number must start with 'BATCH'");
    }

    // Validate year
    if parts[1].len() != 4 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid year in batch number");
    }

    // Validate week segment
    let week = match parts[2].strip_prefix('W') {
        Some(w) => w,
        None => return Err("Batch number week segment must start with 'W'"),
    };
    if week.len() != 2 || !week.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid week in batch number");
    }

    Ok(())
}

// ============================================================================
// Required Field Validations
// ============================================================================

/// Validate that a free-text field is non-empty after trimming
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate that a quantity or volume is strictly positive
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// Wood Assortment Validations
// ============================================================================

/// Wood assortments handled by the mill
pub const WOOD_TYPES: &[&str] = &[
    "Dennenhout", // Pine
    "Vurenhout",  // Spruce
    "Eikenhout",  // Oak
    "Beukenhout", // Beech
    "Berkenhout", // Birch
    "Grenen",     // Scots pine
];

/// Check if a wood type is a known assortment (case insensitive)
pub fn is_known_wood_type(wood_type: &str) -> bool {
    let wood_type_lower = wood_type.to_lowercase();
    WOOD_TYPES.iter().any(|w| w.to_lowercase() == wood_type_lower)
}

/// Validate wood type against the known assortments (case insensitive)
pub fn validate_wood_type(wood_type: &str) -> Result<(), &'static str> {
    if is_known_wood_type(wood_type) {
        Ok(())
    } else {
        Err("Wood type is not a recognized assortment")
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for preadvice entry identifiers
pub const PREADVICE_ID_PREFIX: &str = "AANM-";
/// Prefix for goods receipt identifiers
pub const RECEIPT_ID_PREFIX: &str = "ONT-";
/// Prefix for inventory lot identifiers
pub const LOT_ID_PREFIX: &str = "VRD-";
/// Prefix for production run identifiers
pub const RUN_ID_PREFIX: &str = "RUN-";
/// Prefix for output product identifiers
pub const PRODUCT_ID_PREFIX: &str = "P-";

/// Generates a prefixed entity identifier backed by a random UUID
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4())
}

/// Lifecycle status of an inventory lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LotStatus {
    Available,
    InProduction,
    Processed,
}

impl LotStatus {
    /// Parses the wire representation used in query parameters and storage
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(LotStatus::Available),
            "in-production" => Some(LotStatus::InProduction),
            "processed" => Some(LotStatus::Processed),
            _ => None,
        }
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LotStatus::Available => "available",
            LotStatus::InProduction => "in-production",
            LotStatus::Processed => "processed",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle status of a production run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    Draft,
    Completed,
}

impl RunStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(RunStatus::Draft),
            "completed" => Some(RunStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Draft => "draft",
            RunStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id(LOT_ID_PREFIX);
        assert!(id.starts_with("VRD-"));
        // prefix + UUIDv4 in hyphenated form
        assert_eq!(id.len(), LOT_ID_PREFIX.len() + 36);
    }

    #[test]
    fn test_prefixed_ids_are_unique() {
        let a = prefixed_id(RUN_ID_PREFIX);
        let b = prefixed_id(RUN_ID_PREFIX);
        assert_ne!(a, b);
    }

    #[test]
    fn test_lot_status_round_trip() {
        for status in [
            LotStatus::Available,
            LotStatus::InProduction,
            LotStatus::Processed,
        ] {
            let parsed = LotStatus::parse(&status.to_string());
            assert_eq!(parsed, Some(status));
        }
        assert_eq!(LotStatus::parse("verwerkt"), None);
    }

    #[test]
    fn test_lot_status_serde_values() {
        let json = serde_json::to_string(&LotStatus::InProduction).unwrap();
        assert_eq!(json, "\"in-production\"");
        let back: LotStatus = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(back, LotStatus::Available);
    }

    #[test]
    fn test_run_status_serde_values() {
        let json = serde_json::to_string(&RunStatus::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
        let back: RunStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, RunStatus::Completed);
    }
}

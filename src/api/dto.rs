//! Data Transfer Objects
//!
//! Request and response bodies for the entry endpoint. The client module
//! deserializes the same types, so every DTO derives both directions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{AppendOutcome, Comparison, WeightEntry};

// ============================================
// ENTRY DTOs
// ============================================

/// GET /api/v1/entries response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    /// All entries in creation order
    #[serde(default)]
    pub entries: Vec<WeightEntry>,
}

/// POST /api/v1/entries request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendEntryRequest {
    /// Weight in kilograms, must be positive
    pub weight_kg: f64,
    /// Calendar date (YYYY-MM-DD), defaults to the server's local today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
}

/// POST /api/v1/entries response: the stored entry plus its comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppendEntryResponse {
    #[serde(flatten)]
    pub entry: WeightEntry,
    /// `null` when there was no previous entry
    pub comparison: Option<Comparison>,
}

impl From<AppendOutcome> for AppendEntryResponse {
    fn from(outcome: AppendOutcome) -> Self {
        Self {
            entry: outcome.entry,
            comparison: outcome.comparison,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Number of stored entries, when the store answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_append_response_is_flat() {
        let response = AppendEntryResponse {
            entry: WeightEntry {
                id: 7,
                weight_kg: 73.0,
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 2, 7, 0, 0).unwrap(),
            },
            comparison: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["entry_date"], "2024-01-02");
        assert!(value["comparison"].is_null());

        let parsed: AppendEntryResponse = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn test_append_request_date_is_optional() {
        let req: AppendEntryRequest = serde_json::from_str(r#"{"weight_kg": 72.4}"#).unwrap();
        assert_eq!(req.weight_kg, 72.4);
        assert!(req.entry_date.is_none());

        let req: AppendEntryRequest =
            serde_json::from_str(r#"{"weight_kg": 72.4, "entry_date": "2024-02-29"}"#).unwrap();
        assert_eq!(req.entry_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }
}

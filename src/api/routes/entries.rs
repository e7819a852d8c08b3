//! Entry Routes
//!
//! - GET /api/v1/entries - List all entries
//! - POST /api/v1/entries - Append an entry and compare it with the previous one

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::{AppendEntryRequest, AppendEntryResponse, EntryListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::{is_valid_weight, NewEntry};

/// GET /api/v1/entries
pub async fn list_entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<EntryListResponse>> {
    let entries = state.with_store(|store| store.list()).await?;

    tracing::debug!(count = entries.len(), "Listed entries");

    Ok(Json(EntryListResponse { entries }))
}

/// POST /api/v1/entries
///
/// Stores the entry and reports whether the weight went up, down or stayed
/// the same compared with the entry created right before it.
pub async fn append_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AppendEntryRequest>, JsonRejection>,
) -> ApiResult<Json<AppendEntryResponse>> {
    let Json(req) = payload?;

    validate_append_request(&req)?;

    let entry_date = req.entry_date.unwrap_or_else(|| Local::now().date_naive());
    let new = NewEntry::new(req.weight_kg, entry_date);

    let outcome = state.with_store(move |store| store.append(new)).await?;

    tracing::info!(
        id = outcome.entry.id,
        weight_kg = outcome.entry.weight_kg,
        entry_date = %outcome.entry.entry_date,
        comparison = ?outcome.comparison,
        "Weight entry stored"
    );

    Ok(Json(outcome.into()))
}

/// Validate an append request
fn validate_append_request(req: &AppendEntryRequest) -> ApiResult<()> {
    if !is_valid_weight(req.weight_kg) {
        return Err(ApiError::Validation(
            "weight_kg must be a positive number".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_append_request_valid() {
        let req = AppendEntryRequest {
            weight_kg: 72.4,
            entry_date: None,
        };
        assert!(validate_append_request(&req).is_ok());
    }

    #[test]
    fn test_validate_append_request_non_positive() {
        for weight_kg in [0.0, -72.4] {
            let req = AppendEntryRequest {
                weight_kg,
                entry_date: None,
            };
            assert!(validate_append_request(&req).is_err());
        }
    }
}

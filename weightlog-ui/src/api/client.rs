//! HTTP API Client
//!
//! Functions for communicating with the Weightlog entry endpoint.

use gloo_net::http::Request;

use crate::state::form::{AppendResponse, WeightEntry};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "weightlog_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct EntryListResponse {
    #[serde(default)]
    entries: Vec<WeightEntry>,
}

#[derive(Debug, serde::Serialize)]
struct AppendRequest {
    weight_kg: f64,
    entry_date: chrono::NaiveDate,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

async fn error_message(response: gloo_net::http::Response) -> String {
    let status = response.status();
    response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

// ============ API Functions ============

/// Fetch all entries in creation order
pub async fn fetch_entries() -> Result<Vec<WeightEntry>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/entries", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: EntryListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.entries)
}

/// Append an entry dated `entry_date`
pub async fn append_entry(
    weight_kg: f64,
    entry_date: chrono::NaiveDate,
) -> Result<AppendResponse, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/entries", api_base))
        .json(&AppendRequest {
            weight_kg,
            entry_date,
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

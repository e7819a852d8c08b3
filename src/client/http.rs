//! Entry store HTTP client
//!
//! Talks to `/api/v1/entries` with reqwest. Implements [`EntryApi`] so the
//! view model can run against a live server.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::api::dto::{AppendEntryRequest, AppendEntryResponse, EntryListResponse};
use crate::api::error::ErrorResponse;
use crate::api::ENTRIES_PATH;
use crate::client::error::ClientError;
use crate::client::EntryApi;
use crate::config::ClientConfig;
use crate::storage::WeightEntry;

/// reqwest-backed entry store client
pub struct HttpEntryClient {
    client: Client,
    endpoint: String,
}

impl HttpEntryClient {
    /// Create a client for the server at `config.api_url`
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: entries_url(&config.api_url),
        })
    }
}

/// Join the server base URL with the entry path
fn entries_url(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), ENTRIES_PATH)
}

/// Turn non-success statuses into `ClientError::Rejected`
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(status = %status, error = %e, "Failed to read error body");
            String::new()
        }
    };
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        });

    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EntryApi for HttpEntryClient {
    async fn list_entries(&self) -> Result<Vec<WeightEntry>, ClientError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let list: EntryListResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(ClientError::from_reqwest)?;

        tracing::debug!(count = list.entries.len(), "Fetched entries");
        Ok(list.entries)
    }

    async fn append_entry(
        &self,
        request: AppendEntryRequest,
    ) -> Result<AppendEntryResponse, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        check_status(response)
            .await?
            .json()
            .await
            .map_err(ClientError::from_reqwest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, AppState};
    use crate::config::ApiConfig;
    use crate::storage::{Comparison, EntryStore};
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn spawn_server() -> String {
        let store = Arc::new(EntryStore::in_memory().unwrap());
        let router = build_router(AppState::new(store, ApiConfig::default()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client_for(api_url: &str) -> HttpEntryClient {
        HttpEntryClient::new(&ClientConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_entries_url() {
        assert_eq!(
            entries_url("http://localhost:8082/"),
            "http://localhost:8082/api/v1/entries"
        );
        assert_eq!(
            entries_url("http://localhost:8082"),
            "http://localhost:8082/api/v1/entries"
        );
    }

    #[tokio::test]
    async fn test_append_and_list_against_server() {
        let client = client_for(&spawn_server().await);
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);

        assert!(client.list_entries().await.unwrap().is_empty());

        let first = client
            .append_entry(AppendEntryRequest {
                weight_kg: 72.4,
                entry_date: date,
            })
            .await
            .unwrap();
        assert_eq!(first.comparison, None);

        let second = client
            .append_entry(AppendEntryRequest {
                weight_kg: 73.0,
                entry_date: date,
            })
            .await
            .unwrap();
        assert_eq!(second.comparison, Some(Comparison::Increased));

        let entries = client.list_entries().await.unwrap();
        assert_eq!(entries, vec![first.entry, second.entry]);
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let client = client_for(&spawn_server().await);

        let err = client
            .append_entry(AppendEntryRequest {
                weight_kg: -1.0,
                entry_date: None,
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("positive"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_without_json_body_uses_status() {
        // Unknown path: axum answers 404 with an empty body
        let base = spawn_server().await;
        let client = client_for(&format!("{}/missing", base));

        let err = client.list_entries().await.unwrap_err();

        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "404 Not Found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        let err = client.list_entries().await.unwrap_err();

        assert!(matches!(err, ClientError::Unavailable));
    }
}

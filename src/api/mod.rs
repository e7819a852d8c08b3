//! Weightlog REST API
//!
//! HTTP layer of the entry store, built with Axum.
//!
//! # Endpoints
//!
//! ## Entries
//! - `GET /api/v1/entries` - List all entries
//! - `POST /api/v1/entries` - Append an entry, returns it with a comparison
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use weightlog::api::{serve, AppState};
//! use weightlog::config::ApiConfig;
//! use weightlog::storage::EntryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(EntryStore::open("./weightlog_data/entries.db")?);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Path of the entry endpoint, relative to the server root
pub const ENTRIES_PATH: &str = "/api/v1/entries";

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route(
        "/entries",
        get(routes::entries::list_entries).post(routes::entries::append_entry),
    );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy: any origin when none are configured, otherwise the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    serve_on(listener, state).await
}

/// Serve on an already bound listener until a shutdown signal arrives
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    tracing::info!("Weightlog API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Weightlog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{AppendEntryResponse, EntryListResponse, HealthResponse};
    use crate::api::error::ErrorResponse;
    use crate::storage::{Comparison, EntryStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::Local;
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(EntryStore::in_memory().unwrap());
        build_router(AppState::new(store, ApiConfig::default()))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_entry(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(ENTRIES_PATH)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.entries, Some(0));
    }

    #[tokio::test]
    async fn test_list_entries_empty() {
        let app = create_test_app();

        let response = app.oneshot(get_request(ENTRIES_PATH)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let list: EntryListResponse = read_json(response).await;
        assert!(list.entries.is_empty());
    }

    #[tokio::test]
    async fn test_first_entry_has_null_comparison() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(post_entry(r#"{"weight_kg": 72.4, "entry_date": "2024-05-01"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["weight_kg"], 72.4);
        assert_eq!(body["entry_date"], "2024-05-01");
        assert!(body["comparison"].is_null());
        assert!(body["id"].is_i64());
        assert!(body["created_at"].is_string());

        let list: EntryListResponse = read_json(app.oneshot(get_request(ENTRIES_PATH)).await.unwrap()).await;
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].weight_kg, 72.4);
    }

    #[tokio::test]
    async fn test_comparison_sequence() {
        let app = create_test_app();

        let mut comparisons = Vec::new();
        for weight in ["72.4", "73.0", "71.5", "71.5"] {
            let body = format!(r#"{{"weight_kg": {}, "entry_date": "2024-05-01"}}"#, weight);
            let response = app.clone().oneshot(post_entry(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let appended: AppendEntryResponse = read_json(response).await;
            comparisons.push(appended.comparison);
        }

        assert_eq!(
            comparisons,
            vec![
                None,
                Some(Comparison::Increased),
                Some(Comparison::Decreased),
                Some(Comparison::Same),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_date_defaults_to_today() {
        let app = create_test_app();

        let response = app.oneshot(post_entry(r#"{"weight_kg": 80}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let appended: AppendEntryResponse = read_json(response).await;
        assert_eq!(appended.entry.entry_date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_non_positive_weight_rejected() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(post_entry(r#"{"weight_kg": 0, "entry_date": "2024-05-01"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "VALIDATION_ERROR");

        let list: EntryListResponse = read_json(app.oneshot(get_request(ENTRIES_PATH)).await.unwrap()).await;
        assert!(list.entries.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_weight_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(post_entry(r#"{"weight_kg": "heavy", "entry_date": "2024-05-01"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let app = create_test_app();

        let response = app.oneshot(post_entry("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(ENTRIES_PATH)
                    .header("Origin", "http://localhost:8084")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri(ENTRIES_PATH)
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_configured_origins() {
        let store = Arc::new(EntryStore::in_memory().unwrap());
        let config = ApiConfig {
            cors_origins: vec!["http://localhost:8084".to_string()],
            ..Default::default()
        };
        let app = build_router(AppState::new(store, config));

        let response = app
            .clone()
            .oneshot(preflight("http://localhost:8084"))
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:8084")
        );

        let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
        assert!(!response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}

//! # Weightlog
//!
//! Minimal weight tracker: an entry store that records one weight per
//! submission and tells the caller whether it went up or down, plus a
//! client-side view model that turns those answers into a background,
//! a short notification and a history panel.
//!
//! ## Modules
//!
//! - [`storage`]: SQLite-backed entry store with append-with-comparison
//! - [`api`]: REST API server with Axum
//! - [`client`]: HTTP client and form view model
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weightlog::storage::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EntryStore::open("./weightlog_data/entries.db")?;
//!
//!     let first = store.append(NewEntry::today(72.4))?;
//!     assert_eq!(first.comparison, None);
//!
//!     let second = store.append(NewEntry::today(71.9))?;
//!     println!("{:?}", second.comparison); // Some(Decreased)
//!
//!     println!("{} entries", store.list()?.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    AppendOutcome, Comparison, EntryStore, NewEntry, StorageError, StorageResult, WeightEntry,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use client::{ClientError, ClientView, EntryApi, HttpEntryClient};

pub use config::{ApiConfig, ClientConfig, Config, ConfigError, LoggingConfig, StorageConfig};

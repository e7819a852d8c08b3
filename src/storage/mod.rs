//! Weightlog Entry Store
//!
//! - **types**: `WeightEntry`, `NewEntry`, `Comparison`
//! - **store**: SQLite-backed append-only store
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use weightlog::storage::{EntryStore, NewEntry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EntryStore::open("./weightlog_data/entries.db")?;
//!
//!     let outcome = store.append(NewEntry::today(72.4))?;
//!     println!("stored #{} ({:?})", outcome.entry.id, outcome.comparison);
//!
//!     for entry in store.list()? {
//!         println!("{} {}", entry.entry_date, entry.weight_kg);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::EntryStore;
pub use types::{is_valid_weight, AppendOutcome, Comparison, NewEntry, WeightEntry};

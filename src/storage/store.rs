//! SQLite-backed entry store
//!
//! One table, append-only. The previous-entry lookup and the insert run in a
//! single transaction while the connection mutex is held, so concurrent
//! appends are serialized and "previous" always means the highest `id`
//! committed before this one.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{is_valid_weight, AppendOutcome, Comparison, NewEntry, WeightEntry};
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS weight_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        weight_kg REAL NOT NULL CHECK (weight_kg > 0),
        entry_date TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_entry_date ON weight_entries(entry_date);
";

/// Persistent store of weight entries
pub struct EntryStore {
    /// std::sync::Mutex because rusqlite::Connection is !Sync
    conn: Mutex<Connection>,
    /// Database file, `None` for in-memory stores
    path: Option<PathBuf>,
}

impl EntryStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let store = Self::init(conn, Some(path))?;
        let entries = store.count()?;
        tracing::info!(path = ?store.path, entries, "Entry store opened");
        Ok(store)
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file backing this store
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    /// All entries in creation order
    pub fn list(&self) -> StorageResult<Vec<WeightEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, weight_kg, entry_date, created_at
             FROM weight_entries
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RawEntry {
                id: row.get(0)?,
                weight_kg: row.get(1)?,
                entry_date: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.decode()?);
        }
        Ok(entries)
    }

    /// Append an entry and compare it with the one stored right before it
    pub fn append(&self, new: NewEntry) -> StorageResult<AppendOutcome> {
        if !is_valid_weight(new.weight_kg) {
            return Err(StorageError::InvalidWeight(new.weight_kg));
        }

        let created_at = Utc::now().trunc_subsecs(6);

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let previous: Option<f64> = tx
            .query_row(
                "SELECT weight_kg FROM weight_entries ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        tx.execute(
            "INSERT INTO weight_entries (weight_kg, entry_date, created_at)
             VALUES (?1, ?2, ?3)",
            params![
                new.weight_kg,
                new.entry_date.format(DATE_FORMAT).to_string(),
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        let comparison = Comparison::against(previous, new.weight_kg);

        tracing::debug!(
            id,
            weight_kg = new.weight_kg,
            entry_date = %new.entry_date,
            comparison = ?comparison,
            "Appended weight entry"
        );

        Ok(AppendOutcome {
            entry: WeightEntry {
                id,
                weight_kg: new.weight_kg,
                entry_date: new.entry_date,
                created_at,
            },
            comparison,
        })
    }

    /// Number of stored entries
    pub fn count(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM weight_entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Row as stored, before the text columns are parsed
struct RawEntry {
    id: i64,
    weight_kg: f64,
    entry_date: String,
    created_at: String,
}

impl RawEntry {
    fn decode(self) -> StorageResult<WeightEntry> {
        let entry_date = NaiveDate::parse_from_str(&self.entry_date, DATE_FORMAT).map_err(|e| {
            StorageError::Corrupt(format!(
                "entry {} has invalid entry_date {:?}: {}",
                self.id, self.entry_date, e
            ))
        })?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                StorageError::Corrupt(format!(
                    "entry {} has invalid created_at {:?}: {}",
                    self.id, self.created_at, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(WeightEntry {
            id: self.id,
            weight_kg: self.weight_kg,
            entry_date,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_first_entry_has_no_comparison() {
        let store = EntryStore::in_memory().unwrap();

        let outcome = store.append(NewEntry::new(72.4, date(1))).unwrap();

        assert_eq!(outcome.comparison, None);
        assert_eq!(outcome.entry.weight_kg, 72.4);
        assert_eq!(outcome.entry.entry_date, date(1));

        let entries = store.list().unwrap();
        assert_eq!(entries, vec![outcome.entry]);
    }

    #[test]
    fn test_comparison_follows_creation_order() {
        let store = EntryStore::in_memory().unwrap();

        store.append(NewEntry::new(72.4, date(1))).unwrap();
        let up = store.append(NewEntry::new(73.0, date(2))).unwrap();
        let down = store.append(NewEntry::new(71.5, date(3))).unwrap();
        let same = store.append(NewEntry::new(71.5, date(4))).unwrap();

        assert_eq!(up.comparison, Some(Comparison::Increased));
        assert_eq!(down.comparison, Some(Comparison::Decreased));
        assert_eq!(same.comparison, Some(Comparison::Same));
    }

    #[test]
    fn test_previous_is_by_creation_not_by_date() {
        let store = EntryStore::in_memory().unwrap();

        store.append(NewEntry::new(70.0, date(10))).unwrap();
        // Back-dated entry still compares against the most recent insert
        let outcome = store.append(NewEntry::new(71.0, date(2))).unwrap();

        assert_eq!(outcome.comparison, Some(Comparison::Increased));
    }

    #[test]
    fn test_dates_need_not_be_unique() {
        let store = EntryStore::in_memory().unwrap();

        store.append(NewEntry::new(70.0, date(1))).unwrap();
        store.append(NewEntry::new(69.8, date(1))).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].id < entries[1].id);
        assert_eq!(entries[1].weight_kg, 69.8);
    }

    #[test]
    fn test_rejects_invalid_weight() {
        let store = EntryStore::in_memory().unwrap();

        for weight in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = store.append(NewEntry::new(weight, date(1)));
            assert!(matches!(result, Err(StorageError::InvalidWeight(_))));
        }

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_rejected_entry_does_not_become_previous() {
        let store = EntryStore::in_memory().unwrap();

        store.append(NewEntry::new(72.0, date(1))).unwrap();
        assert!(store.append(NewEntry::new(-1.0, date(2))).is_err());
        let outcome = store.append(NewEntry::new(71.0, date(3))).unwrap();

        assert_eq!(outcome.comparison, Some(Comparison::Decreased));
    }

    #[test]
    fn test_persistence_across_opens() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("entries.db");

        {
            let store = EntryStore::open(&db_path).unwrap();
            store.append(NewEntry::new(72.4, date(1))).unwrap();
            store.append(NewEntry::new(73.0, date(2))).unwrap();
        }

        let store = EntryStore::open(&db_path).unwrap();
        assert_eq!(store.path(), Some(db_path.as_path()));
        assert_eq!(store.count().unwrap(), 2);

        let outcome = store.append(NewEntry::new(72.0, date(3))).unwrap();
        assert_eq!(outcome.comparison, Some(Comparison::Decreased));
        assert_eq!(outcome.entry.id, 3);
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        let store = Arc::new(EntryStore::in_memory().unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .append(NewEntry::new(60.0 + i as f64, date(1)))
                        .unwrap()
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(outcomes.iter().filter(|o| o.comparison.is_none()).count(), 1);
        assert_eq!(store.count().unwrap(), 8);

        // Every comparison must agree with the stored order
        let entries = store.list().unwrap();
        for pair in entries.windows(2) {
            let outcome = outcomes
                .iter()
                .find(|o| o.entry.id == pair[1].id)
                .unwrap();
            assert_eq!(
                outcome.comparison,
                Some(Comparison::between(pair[0].weight_kg, pair[1].weight_kg))
            );
        }
    }
}

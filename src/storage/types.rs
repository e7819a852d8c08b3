//! Core data types for the Weightlog entry store
//!
//! - `WeightEntry`: one persisted (date, weight) record
//! - `NewEntry`: what a client submits
//! - `Comparison`: how a new weight relates to the previous one
//! - `AppendOutcome`: the stored record plus its comparison

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single stored weight measurement
///
/// Entries are append-only: once the store assigns `id` and `created_at`
/// the record never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    /// Monotonic identifier, assigned by the store in creation order
    pub id: i64,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Calendar day the weight belongs to
    pub entry_date: NaiveDate,
    /// When the store created the record
    pub created_at: DateTime<Utc>,
}

/// An entry that has not been stored yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewEntry {
    pub weight_kg: f64,
    pub entry_date: NaiveDate,
}

impl NewEntry {
    pub fn new(weight_kg: f64, entry_date: NaiveDate) -> Self {
        Self {
            weight_kg,
            entry_date,
        }
    }

    /// Entry dated with the local calendar day
    pub fn today(weight_kg: f64) -> Self {
        Self::new(weight_kg, Local::now().date_naive())
    }
}

/// Check that a weight can be stored: finite and strictly positive
pub fn is_valid_weight(weight_kg: f64) -> bool {
    weight_kg.is_finite() && weight_kg > 0.0
}

/// Direction of change between two consecutive entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Increased,
    Decreased,
    Same,
}

impl Comparison {
    /// Classify `current` against `previous`
    pub fn between(previous: f64, current: f64) -> Self {
        match current.partial_cmp(&previous) {
            Some(Ordering::Greater) => Comparison::Increased,
            Some(Ordering::Less) => Comparison::Decreased,
            _ => Comparison::Same,
        }
    }

    /// Comparison against an optional previous weight; `None` for the first entry
    pub fn against(previous: Option<f64>, current: f64) -> Option<Self> {
        previous.map(|p| Self::between(p, current))
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Increased => write!(f, "increased"),
            Comparison::Decreased => write!(f, "decreased"),
            Comparison::Same => write!(f, "same"),
        }
    }
}

/// Result of appending an entry
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
    pub entry: WeightEntry,
    pub comparison: Option<Comparison>,
}

//! Form Logic
//!
//! Parsing, comparison reactions and history formatting. Kept free of
//! signals and browser APIs so it runs under plain `cargo test`.

use chrono::NaiveDate;

pub const INVALID_WEIGHT_MESSAGE: &str = "Enter a valid weight";
pub const SAVED_MESSAGE: &str = "Weight saved";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save weight";
pub const EMPTY_HISTORY: &str = "No entries yet";

/// Stored entry as returned by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    pub weight_kg: f64,
    pub entry_date: NaiveDate,
}

/// How a new weight relates to the previous entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Increased,
    Decreased,
    Same,
}

/// POST response: the stored entry plus its comparison
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AppendResponse {
    #[serde(flatten)]
    pub entry: WeightEntry,
    #[serde(default)]
    pub comparison: Option<Comparison>,
}

/// Page background
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Backdrop {
    #[default]
    Calm,
    Warning,
}

impl Backdrop {
    pub fn gradient(&self) -> &'static str {
        match self {
            Backdrop::Calm => "from-sky-400 to-sky-300",
            Backdrop::Warning => "from-red-500 to-red-400",
        }
    }
}

/// Background and notification text for a comparison; `None` changes nothing
pub fn reaction(comparison: Option<Comparison>) -> Option<(Backdrop, &'static str)> {
    match comparison? {
        Comparison::Increased => Some((Backdrop::Warning, "ugly")),
        Comparison::Decreased => Some((Backdrop::Calm, "you're a butterfly")),
        Comparison::Same => None,
    }
}

/// Finite positive number, or `None`
pub fn parse_weight(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

/// `DD.MM.YYYY  <weight> kg`
pub fn history_line(entry: &WeightEntry) -> String {
    format!("{}  {} kg", entry.entry_date.format("%d.%m.%Y"), entry.weight_kg)
}

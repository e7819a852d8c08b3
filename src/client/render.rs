//! Text rendering of the history panel

use chrono::NaiveDate;

use crate::storage::WeightEntry;

/// Shown instead of the list when there are no entries
pub const EMPTY_HISTORY: &str = "No entries yet";

/// Day-first date, e.g. `09.03.2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Weight with unit; whole numbers print without a decimal part
pub fn format_weight(weight_kg: f64) -> String {
    format!("{} kg", weight_kg)
}

/// One line per entry, or the placeholder for an empty history
pub fn history_lines(entries: &[WeightEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![EMPTY_HISTORY.to_string()];
    }

    entries
        .iter()
        .map(|e| format!("{}  {}", format_date(e.entry_date), format_weight(e.weight_kg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_formatting() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "09.03.2024");
        assert_eq!(format_weight(72.4), "72.4 kg");
        assert_eq!(format_weight(73.0), "73 kg");
    }

    #[test]
    fn test_history_lines() {
        assert_eq!(history_lines(&[]), vec![EMPTY_HISTORY.to_string()]);

        let entries = vec![WeightEntry {
            id: 1,
            weight_kg: 71.5,
            entry_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            created_at: Utc::now(),
        }];
        assert_eq!(history_lines(&entries), vec!["31.12.2024  71.5 kg".to_string()]);
    }
}

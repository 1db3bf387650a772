//! Sector health records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eleven GICS-style sectors shown on the deep-dive screen.
pub const MAIN_SECTORS: [&str; 11] = [
    "Energy",
    "Basic Materials",
    "Industrials",
    "Consumer Cyclical",
    "Consumer Defensive",
    "Healthcare",
    "Financials",
    "Technology",
    "Communication Services",
    "Utilities",
    "Real Estate",
];

/// Categorical trend label for a sector.
///
/// Upstream writes free text; the three known labels are recognized
/// case-insensitively and anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Outlook {
    Bullish,
    #[default]
    Neutral,
    Bearish,
    Other(String),
}

impl Outlook {
    /// Parse a raw cell. Blank input is `Neutral`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "neutral" => Outlook::Neutral,
            "bullish" => Outlook::Bullish,
            "bearish" => Outlook::Bearish,
            _ => Outlook::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Outlook::Bullish => "Bullish",
            Outlook::Neutral => "Neutral",
            Outlook::Bearish => "Bearish",
            Outlook::Other(label) => label,
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Outlook {
    fn from(raw: String) -> Self {
        Outlook::parse(&raw)
    }
}

impl From<Outlook> for String {
    fn from(outlook: Outlook) -> Self {
        outlook.as_str().to_string()
    }
}

/// One model's investment opinion on a sector for a report date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    /// Registry key, e.g. `Qwen`.
    pub model_key: String,
    /// Free-text reasoning; `None` when the model gave none.
    pub reason: Option<String>,
    /// Investment score on a 0–10 scale.
    pub score: f64,
}

/// One row per (sector, report date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub sector: String,
    pub report_date: Option<NaiveDate>,
    /// Aggregate 0–10 health score for the day.
    pub health_score: f64,
    pub news_volume: u32,
    pub outlook: Outlook,
    pub model_verdicts: Vec<ModelVerdict>,
}

impl SectorRecord {
    pub fn verdict(&self, model_key: &str) -> Option<&ModelVerdict> {
        self.model_verdicts.iter().find(|v| v.model_key == model_key)
    }
}

/// Normalized sector table, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorTable {
    pub records: Vec<SectorRecord>,
}

impl SectorTable {
    pub fn new(records: Vec<SectorRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectorRecord> {
        self.records.iter()
    }

    /// Latest report date present in the table.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.report_date).max()
    }
}

impl<'a> IntoIterator for &'a SectorTable {
    type Item = &'a SectorRecord;
    type IntoIter = std::slice::Iter<'a, SectorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlook_parses_known_labels_case_insensitively() {
        assert_eq!(Outlook::parse("BULLISH"), Outlook::Bullish);
        assert_eq!(Outlook::parse(" bearish "), Outlook::Bearish);
        assert_eq!(Outlook::parse("Neutral"), Outlook::Neutral);
    }

    #[test]
    fn blank_outlook_is_neutral() {
        assert_eq!(Outlook::parse(""), Outlook::Neutral);
        assert_eq!(Outlook::parse("   "), Outlook::Neutral);
    }

    #[test]
    fn unknown_outlook_is_kept_verbatim() {
        let outlook = Outlook::parse(" Cautiously Bullish ");
        assert_eq!(outlook, Outlook::Other("Cautiously Bullish".into()));
        assert_eq!(outlook.to_string(), "Cautiously Bullish");
    }

    #[test]
    fn latest_date_ignores_missing_dates() {
        let record = |date: Option<NaiveDate>| SectorRecord {
            sector: "Energy".into(),
            report_date: date,
            health_score: 5.0,
            news_volume: 10,
            outlook: Outlook::Neutral,
            model_verdicts: vec![],
        };
        let table = SectorTable::new(vec![
            record(NaiveDate::from_ymd_opt(2024, 1, 1)),
            record(None),
            record(NaiveDate::from_ymd_opt(2024, 1, 3)),
        ]);
        assert_eq!(table.latest_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(SectorTable::default().latest_date(), None);
    }
}

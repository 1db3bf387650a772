//! News feed records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tag used when a news item carries no sector.
pub const GENERAL_SECTOR: &str = "General";

/// One normalized news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Zero-based position in the source file.
    pub id: usize,
    pub title: String,
    pub link: String,
    pub source: String,
    /// Publication time; `None` when the cell did not parse.
    pub published_at: Option<NaiveDateTime>,
    /// Article text with the wire-service byline stripped.
    pub content: String,
    /// Sector tags, never empty.
    pub combined_sectors: Vec<String>,
    /// Sentiment on a 0–10 scale.
    pub sentiment_score: f64,
    /// AI-generated summary, possibly empty.
    pub short_answer: String,
}

impl NewsRecord {
    /// Sector tags joined the way upstream writes them.
    pub fn sectors_label(&self) -> String {
        self.combined_sectors.join(", ")
    }

    pub fn has_short_answer(&self) -> bool {
        !self.short_answer.trim().is_empty()
    }
}

/// Split a comma-joined sector field into trimmed tags.
///
/// Blank or missing input yields `["General"]`.
pub fn split_sectors(raw: Option<&str>) -> Vec<String> {
    let tags: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if tags.is_empty() {
        vec![GENERAL_SECTOR.to_string()]
    } else {
        tags
    }
}

/// Normalized news table, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsTable {
    pub records: Vec<NewsRecord>,
}

impl NewsTable {
    pub fn new(records: Vec<NewsRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NewsRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a NewsTable {
    type Item = &'a NewsRecord;
    type IntoIter = std::slice::Iter<'a, NewsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sectors_trims_and_drops_blanks() {
        assert_eq!(
            split_sectors(Some(" Technology, Financials ,, ")),
            vec!["Technology", "Financials"]
        );
    }

    #[test]
    fn missing_or_blank_sectors_become_general() {
        assert_eq!(split_sectors(None), vec![GENERAL_SECTOR]);
        assert_eq!(split_sectors(Some("")), vec![GENERAL_SECTOR]);
        assert_eq!(split_sectors(Some(" , ")), vec![GENERAL_SECTOR]);
    }
}

//! News feed normalization.

use super::adapter::{BoundField, ColumnRule, FieldSpec};
use super::dates::parse_datetime;
use super::error::Loaded;
use super::raw::CsvTable;
use crate::clean::clean_optional;
use crate::domain::news::split_sectors;
use crate::domain::{NewsRecord, NewsTable};
use csv::StringRecord;
use std::path::Path;

/// Score used when no rule yields a value.
pub const NEUTRAL_SENTIMENT: f64 = 5.0;

/// Default score rules, highest priority first. Model columns hold 0–1
/// probabilities and are scaled onto the 0–10 display range.
pub fn default_score_rules() -> Vec<ColumnRule> {
    vec![
        ColumnRule::scaled("Score_Qwen2.5-14B-Instruct", 10.0),
        ColumnRule::scaled("Score_finma-7b-full", 10.0),
        ColumnRule::new("Sentiment_Score"),
    ]
}

/// Raw column names feeding each news field.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsSchema {
    pub title: FieldSpec,
    pub link: FieldSpec,
    pub source: FieldSpec,
    pub published_at: FieldSpec,
    pub content: FieldSpec,
    pub sectors: FieldSpec,
    pub sentiment_score: FieldSpec,
    pub short_answer: FieldSpec,
}

impl Default for NewsSchema {
    fn default() -> Self {
        Self::with_score_rules(default_score_rules())
    }
}

impl NewsSchema {
    pub fn with_score_rules(rules: Vec<ColumnRule>) -> Self {
        Self {
            title: FieldSpec::column("title", "Title"),
            link: FieldSpec::column("link", "Link"),
            source: FieldSpec::column("source", "Source"),
            published_at: FieldSpec::column("published_at", "Date"),
            content: FieldSpec::column("content", "Content"),
            sectors: FieldSpec::column("combined_sectors", "Combined_Sector"),
            sentiment_score: FieldSpec::new("sentiment_score", rules),
            short_answer: FieldSpec::column("short_answer", "Short_Ans"),
        }
    }
}

/// Loads and normalizes news CSVs.
#[derive(Debug, Clone, Default)]
pub struct NewsLoader {
    pub schema: NewsSchema,
}

impl NewsLoader {
    pub fn new(schema: NewsSchema) -> Self {
        Self { schema }
    }

    /// Read and normalize a file. Never fails: problems are carried in
    /// [`Loaded::error`] next to an empty table.
    pub fn load(&self, path: &Path) -> Loaded<NewsTable> {
        match CsvTable::from_path(path) {
            Ok(csv) => {
                let table = self.normalize(&csv);
                tracing::info!(path = %path.display(), rows = table.len(), "loaded news feed");
                Loaded::ok(table)
            }
            Err(err) => {
                tracing::warn!(error = %err, "news feed unavailable");
                Loaded::failed(err)
            }
        }
    }

    /// Reconcile a raw table into canonical records, one per row.
    pub fn normalize(&self, csv: &CsvTable) -> NewsTable {
        let s = &self.schema;
        let title = s.title.bind(&csv.headers);
        let link = s.link.bind(&csv.headers);
        let source = s.source.bind(&csv.headers);
        let published_at = s.published_at.bind(&csv.headers);
        let content = s.content.bind(&csv.headers);
        let sectors = s.sectors.bind(&csv.headers);
        let score = s.sentiment_score.bind(&csv.headers);
        let short_answer = s.short_answer.bind(&csv.headers);

        match score.primary_column() {
            Some(column) => tracing::debug!(column, "sentiment score column"),
            None => tracing::debug!("no sentiment score column, using neutral default"),
        }

        let records = csv
            .rows
            .iter()
            .enumerate()
            .map(|(id, row)| NewsRecord {
                id,
                title: owned_text(&title, row),
                link: owned_text(&link, row),
                source: owned_text(&source, row),
                published_at: published_at.parse_with(row, parse_datetime),
                content: clean_optional(content.text(row)),
                combined_sectors: split_sectors(sectors.text(row)),
                sentiment_score: score.number(row).unwrap_or(NEUTRAL_SENTIMENT),
                short_answer: owned_text(&short_answer, row),
            })
            .collect();

        NewsTable::new(records)
    }
}

fn owned_text(field: &BoundField, row: &StringRecord) -> String {
    field.text(row).map(String::from).unwrap_or_default()
}

/// Load a news feed with the default schema.
pub fn load_news_feed(path: impl AsRef<Path>) -> Loaded<NewsTable> {
    NewsLoader::default().load(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(data: &str) -> CsvTable {
        CsvTable::from_reader(data.as_bytes(), Path::new("news.csv")).unwrap()
    }

    #[test]
    fn primary_score_column_wins_and_is_scaled() {
        let table = NewsLoader::default().normalize(&csv(
            "Title,Score_finma-7b-full,Score_Qwen2.5-14B-Instruct\nOil up,0.9,0.5\n",
        ));
        assert_eq!(table.records[0].sentiment_score, 5.0);
    }

    #[test]
    fn fallback_score_column_is_scaled() {
        let table = NewsLoader::default().normalize(&csv("Title,Score_finma-7b-full\nOil up,0.72\n"));
        assert!((table.records[0].sentiment_score - 7.2).abs() < 1e-9);
    }

    #[test]
    fn existing_sentiment_score_is_used_unscaled() {
        let table = NewsLoader::default().normalize(&csv("Title,Sentiment_Score\nOil up,6.5\n"));
        assert_eq!(table.records[0].sentiment_score, 6.5);
    }

    #[test]
    fn no_score_column_is_neutral() {
        let table = NewsLoader::default().normalize(&csv("Title\nA\nB\n"));
        assert!(table.iter().all(|r| r.sentiment_score == NEUTRAL_SENTIMENT));
    }

    #[test]
    fn bad_date_becomes_none_and_row_is_kept() {
        let table = NewsLoader::default().normalize(&csv(
            "Title,Date\nA,2024-02-01 10:00:00\nB,not a date\n",
        ));
        assert_eq!(table.len(), 2);
        assert!(table.records[0].published_at.is_some());
        assert!(table.records[1].published_at.is_none());
        assert_eq!(table.records[1].id, 1);
    }

    #[test]
    fn optional_columns_default() {
        let table = NewsLoader::default().normalize(&csv("Title\nA\n"));
        let r = &table.records[0];
        assert_eq!(r.combined_sectors, vec!["General"]);
        assert_eq!(r.content, "");
        assert_eq!(r.short_answer, "");
        assert_eq!(r.link, "");
    }

    #[test]
    fn short_row_defaults_missing_trailing_cells() {
        let table = NewsLoader::default().normalize(&csv(
            "Title,Content,Sentiment_Score,Short_Ans\nA,first,7,Buy\nB,body,3\n",
        ));
        assert_eq!(table.len(), 2);
        let b = &table.records[1];
        assert_eq!(b.title, "B");
        assert_eq!(b.sentiment_score, 3.0);
        assert_eq!(b.short_answer, "");
    }

    #[test]
    fn nan_text_cells_are_missing() {
        let table = NewsLoader::default().normalize(&csv(
            "Title,Content,Combined_Sector,Short_Ans\nA,nan,nan,NaN\n",
        ));
        let r = &table.records[0];
        assert_eq!(r.combined_sectors, vec!["General"]);
        assert_eq!(r.content, "");
        assert_eq!(r.short_answer, "");
        assert!(!r.has_short_answer());
    }

    #[test]
    fn content_is_cleaned_and_sectors_split() {
        let table = NewsLoader::default().normalize(&csv(
            "Title,Content,Combined_Sector,Short_Ans\n\
             A,\"HOUSTON (Reuters) - Crude\n rallied.\",\"Energy, Basic Materials\",Buy energy\n",
        ));
        let r = &table.records[0];
        assert_eq!(r.content, "Crude rallied.");
        assert_eq!(r.combined_sectors, vec!["Energy", "Basic Materials"]);
        assert_eq!(r.short_answer, "Buy energy");
    }

    #[test]
    fn custom_score_rules() {
        let loader = NewsLoader::new(NewsSchema::with_score_rules(vec![ColumnRule::scaled(
            "Score_Llama", 10.0,
        )]));
        let table = loader.normalize(&csv("Title,Score_Llama,Sentiment_Score\nA,0.3,9\n"));
        assert_eq!(table.records[0].sentiment_score, 3.0);
    }
}

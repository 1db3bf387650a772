//! Integration tests for the loaders against the CSV fixtures.

use chrono::{NaiveDate, NaiveDateTime};
use sentiment_core::data::{
    load_news_feed, load_sector_history, load_sector_snapshots, LoadError, ModelRegistry,
    SectorLoader, NEUTRAL_SENTIMENT,
};
use sentiment_core::domain::{Outlook, GENERAL_SECTOR, MAIN_SECTORS};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn whitelist() -> Vec<String> {
    MAIN_SECTORS.iter().map(|s| s.to_string()).collect()
}

// ── Sector snapshot ──────────────────────────────────────────────────

#[test]
fn snapshot_keeps_global_latest_date_only() {
    let loaded = load_sector_snapshots(fixture("sector_snapshot.csv"));
    assert!(loaded.error.is_none());

    let table = loaded.table;
    assert_eq!(table.latest_date(), Some(date(2025, 3, 10)));
    let sectors: Vec<&str> = table.iter().map(|r| r.sector.as_str()).collect();
    // Utilities only reported on the 9th and drops out.
    assert_eq!(sectors, vec!["Energy", "Technology", "Healthcare", "Crypto"]);
    assert!(table.iter().all(|r| r.report_date == Some(date(2025, 3, 10))));
}

#[test]
fn snapshot_coerces_fields() {
    let table = load_sector_snapshots(fixture("sector_snapshot.csv")).table;
    let energy = &table.records[0];
    assert_eq!(energy.health_score, 7.25);
    assert_eq!(energy.news_volume, 21);
    assert_eq!(energy.outlook, Outlook::Bullish);

    let tech = &table.records[1];
    assert_eq!(tech.outlook, Outlook::Neutral);

    let health = &table.records[2];
    assert_eq!(health.news_volume, 10);
    assert_eq!(health.outlook, Outlook::Bearish);

    let crypto = &table.records[3];
    assert_eq!(crypto.outlook, Outlook::Other("Euphoric".into()));
    assert!(crypto.model_verdicts.is_empty());
}

#[test]
fn missing_snapshot_is_empty_and_silent() {
    let loaded = load_sector_snapshots(fixture("does_not_exist.csv"));
    assert!(loaded.table.is_empty());
    assert!(loaded.is_missing());
    assert_eq!(loaded.diagnostic(), None);
}

// ── Sector history ───────────────────────────────────────────────────

#[test]
fn history_applies_whitelist_and_keeps_all_dates() {
    let wl = whitelist();
    let table = load_sector_history(fixture("sector_history.csv"), Some(wl.as_slice())).table;

    assert_eq!(table.len(), 5);
    assert!(table.iter().all(|r| r.sector != "Crypto"));
    let undated: Vec<_> = table.iter().filter(|r| r.report_date.is_none()).collect();
    assert_eq!(undated.len(), 1);
    assert_eq!(undated[0].sector, "Technology");
}

#[test]
fn history_falls_back_to_secondary_score_column_per_row() {
    let table = load_sector_history(fixture("sector_history.csv"), None).table;
    let scores: Vec<f64> = table
        .iter()
        .filter(|r| r.sector == "Energy")
        .map(|r| r.health_score)
        .collect();
    // Row order as in the file: 03-08, 03-10, 03-09 (blank daily score).
    assert_eq!(scores, vec![5.0, 6.9, 4.4]);
}

#[test]
fn history_discovers_models_in_header_order() {
    let table = load_sector_history(fixture("sector_history.csv"), None).table;
    let energy = table
        .iter()
        .find(|r| r.sector == "Energy" && r.report_date == Some(date(2025, 3, 10)))
        .unwrap();

    let keys: Vec<&str> = energy.model_verdicts.iter().map(|v| v.model_key.as_str()).collect();
    assert_eq!(keys, vec!["Qwen", "Llama", "Mistral"]);

    let qwen = energy.verdict("Qwen").unwrap();
    assert_eq!(qwen.reason.as_deref(), Some("Supply cuts hold"));
    assert_eq!(qwen.score, 8.2);

    let mistral = energy.verdict("Mistral").unwrap();
    assert_eq!(mistral.reason, None);
    assert_eq!(mistral.score, 3.0);
}

#[test]
fn missing_model_score_defaults_to_zero() {
    let table = load_sector_history(fixture("sector_history.csv"), None).table;
    let energy = table
        .iter()
        .find(|r| r.sector == "Energy" && r.report_date == Some(date(2025, 3, 9)))
        .unwrap();
    let mistral = energy.verdict("Mistral").unwrap();
    assert_eq!(mistral.reason.as_deref(), Some("Cautious"));
    assert_eq!(mistral.score, 0.0);
}

#[test]
fn custom_prefixes_change_discovery() {
    let registry = ModelRegistry {
        reason_prefix: "Reason:".into(),
        score_prefix: "Score:".into(),
        ..ModelRegistry::default()
    };
    let loader = SectorLoader::history(registry, None);
    let table = loader.load(&fixture("sector_history.csv")).table;
    assert!(table.iter().all(|r| r.model_verdicts.is_empty()));
}

// ── News feed ────────────────────────────────────────────────────────

#[test]
fn news_scores_use_first_available_rule_per_row() {
    let table = load_news_feed(fixture("news_feed.csv")).table;
    let scores: Vec<f64> = table.iter().map(|r| r.sentiment_score).collect();

    assert!((scores[0] - 8.2).abs() < 1e-9, "primary model, scaled");
    assert!((scores[1] - 1.5).abs() < 1e-9, "secondary model, scaled");
    assert_eq!(scores[2], 5.2);
    assert_eq!(scores[3], NEUTRAL_SENTIMENT);
    assert_eq!(scores[4], 7.5, "nan in the model column falls through");
}

#[test]
fn news_content_is_cleaned() {
    let table = load_news_feed(fixture("news_feed.csv")).table;
    assert_eq!(table.records[0].content, "Oil prices jumped on Monday.");
    assert_eq!(table.records[1].content, "Bank shares slid after the report.");
    assert_eq!(table.records[4].content, "Shares rose after approval.");
}

#[test]
fn news_fields_are_normalized() {
    let table = load_news_feed(fixture("news_feed.csv")).table;
    assert_eq!(table.len(), 5);

    let banks = &table.records[1];
    assert_eq!(banks.id, 1);
    assert_eq!(banks.combined_sectors, vec!["Financials", "Real Estate"]);
    assert_eq!(banks.published_at, Some(datetime("2025-03-10 07:15:00")));
    assert!(!banks.has_short_answer());

    let quiet = &table.records[3];
    assert_eq!(quiet.published_at, None);
    assert_eq!(quiet.combined_sectors, vec![GENERAL_SECTOR]);

    let pharma = &table.records[4];
    assert_eq!(pharma.published_at, Some(datetime("2025-03-08 12:00:00")));
    assert_eq!(pharma.short_answer, "FDA nod boosts outlook");
}

#[test]
fn legacy_news_schema_fills_defaults() {
    let table = load_news_feed(fixture("news_legacy.csv")).table;
    assert_eq!(table.len(), 2);

    let retail = &table.records[0];
    assert_eq!(retail.link, "");
    assert_eq!(retail.short_answer, "");
    assert_eq!(retail.sentiment_score, 6.4);
    assert_eq!(retail.published_at, Some(datetime("2025-03-10 09:00:00")));
}

#[test]
fn malformed_news_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "Title,Sentiment_Score\nA,1,extra\n").unwrap();

    let loaded = load_news_feed(&path);
    assert!(loaded.table.is_empty());
    match &loaded.error {
        Some(LoadError::Malformed { path: p, .. }) => assert_eq!(p, &path),
        other => panic!("expected Malformed, got {other:?}"),
    }
    assert!(loaded.diagnostic().unwrap().contains("broken.csv"));
}

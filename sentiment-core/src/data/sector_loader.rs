//! Sector snapshot normalization.
//!
//! Column reconciliation:
//! 1. `Report_Date` is parsed leniently. Without the column (or without a
//!    single parseable cell) every row is kept.
//! 2. In snapshot mode only rows dated at the global latest date survive.
//! 3. `health_score` comes from `Final_Daily_Score`, then `Final_AI_Score`;
//!    parse failures become 0.0.
//! 4. `news_volume` defaults to 10 and `outlook` to Neutral.

use super::adapter::{parse_number, ColumnRule, FieldSpec};
use super::dates::parse_date;
use super::error::{LoadError, Loaded};
use super::raw::{first_existing, CsvTable};
use super::registry::ModelRegistry;
use crate::domain::{Outlook, SectorRecord, SectorTable};
use std::path::{Path, PathBuf};

pub const DEFAULT_NEWS_VOLUME: u32 = 10;
pub const DEFAULT_HEALTH_SCORE: f64 = 0.0;

/// Raw column names feeding each sector field.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSchema {
    pub sector: FieldSpec,
    pub report_date: FieldSpec,
    pub health_score: FieldSpec,
    pub news_volume: FieldSpec,
    pub outlook: FieldSpec,
}

impl Default for SectorSchema {
    fn default() -> Self {
        Self {
            sector: FieldSpec::column("sector", "Sector"),
            report_date: FieldSpec::column("report_date", "Report_Date"),
            health_score: FieldSpec::new(
                "health_score",
                vec![
                    ColumnRule::new("Final_Daily_Score"),
                    ColumnRule::new("Final_AI_Score"),
                ],
            ),
            news_volume: FieldSpec::column("news_volume", "News_Volume"),
            outlook: FieldSpec::column("outlook", "Final_Outlook"),
        }
    }
}

/// Which rows of the file to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Only rows at the latest report date in the file.
    Latest,
    /// Every dated row, for trend views.
    History,
}

/// Loads and normalizes sector CSVs.
#[derive(Debug, Clone)]
pub struct SectorLoader {
    pub schema: SectorSchema,
    pub registry: ModelRegistry,
    pub mode: SnapshotMode,
    /// Exact sector names to keep; `None` keeps everything.
    pub whitelist: Option<Vec<String>>,
}

impl Default for SectorLoader {
    fn default() -> Self {
        Self::snapshot(ModelRegistry::default())
    }
}

impl SectorLoader {
    pub fn snapshot(registry: ModelRegistry) -> Self {
        Self {
            schema: SectorSchema::default(),
            registry,
            mode: SnapshotMode::Latest,
            whitelist: None,
        }
    }

    pub fn history(registry: ModelRegistry, whitelist: Option<Vec<String>>) -> Self {
        Self {
            schema: SectorSchema::default(),
            registry,
            mode: SnapshotMode::History,
            whitelist,
        }
    }

    /// Read and normalize a file. Never fails: problems are carried in
    /// [`Loaded::error`] next to an empty table.
    pub fn load(&self, path: &Path) -> Loaded<SectorTable> {
        match CsvTable::from_path(path) {
            Ok(csv) => {
                let table = self.normalize(&csv);
                tracing::info!(
                    path = %path.display(),
                    rows = csv.rows.len(),
                    kept = table.len(),
                    "loaded sector data"
                );
                Loaded::ok(table)
            }
            Err(err) => {
                tracing::warn!(error = %err, "sector data unavailable");
                Loaded::failed(err)
            }
        }
    }

    /// Load the first existing path among `candidates`.
    pub fn load_first(&self, candidates: &[PathBuf]) -> Loaded<SectorTable> {
        match first_existing(candidates) {
            Some(path) => self.load(path),
            None => Loaded::failed(LoadError::MissingSource {
                path: candidates.first().cloned().unwrap_or_default(),
            }),
        }
    }

    /// Reconcile a raw table into canonical records.
    pub fn normalize(&self, csv: &CsvTable) -> SectorTable {
        let sector = self.schema.sector.bind(&csv.headers);
        let report_date = self.schema.report_date.bind(&csv.headers);
        let health_score = self.schema.health_score.bind(&csv.headers);
        let news_volume = self.schema.news_volume.bind(&csv.headers);
        let outlook = self.schema.outlook.bind(&csv.headers);
        let models = self.registry.discover(&csv.headers);

        let mut records: Vec<SectorRecord> = csv
            .rows
            .iter()
            .filter_map(|row| {
                let Some(name) = sector.text(row) else {
                    tracing::debug!("skipping sector row without a name");
                    return None;
                };
                Some(SectorRecord {
                    sector: name.to_string(),
                    report_date: report_date.parse_with(row, parse_date),
                    health_score: health_score.number(row).unwrap_or(DEFAULT_HEALTH_SCORE),
                    news_volume: news_volume
                        .parse_with(row, parse_volume)
                        .unwrap_or(DEFAULT_NEWS_VOLUME),
                    outlook: outlook.text(row).map(Outlook::parse).unwrap_or_default(),
                    model_verdicts: models.iter().map(|m| m.verdict(row)).collect(),
                })
            })
            .collect();

        if let Some(whitelist) = &self.whitelist {
            records.retain(|r| whitelist.iter().any(|w| w == &r.sector));
        }

        if self.mode == SnapshotMode::Latest {
            // Global latest date, not per-sector
            if let Some(latest) = records.iter().filter_map(|r| r.report_date).max() {
                records.retain(|r| r.report_date == Some(latest));
            }
        }

        SectorTable::new(records)
    }
}

fn parse_volume(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return Some(v);
    }
    parse_number(trimmed)
        .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v.round() as u32)
}

/// Latest-date snapshot with no sector restriction.
pub fn load_sector_snapshots(path: impl AsRef<Path>) -> Loaded<SectorTable> {
    SectorLoader::default().load(path.as_ref())
}

/// Every dated row, optionally restricted to `whitelist`.
pub fn load_sector_history(
    path: impl AsRef<Path>,
    whitelist: Option<&[String]>,
) -> Loaded<SectorTable> {
    SectorLoader::history(ModelRegistry::default(), whitelist.map(<[String]>::to_vec))
        .load(path.as_ref())
}

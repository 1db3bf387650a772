//! Screen-level view models for the three dashboard pages.
//!
//! [`Dashboard`] owns the snapshot caches and turns normalized tables into
//! plain serializable structs. Rendering them is left to the caller.

use crate::clean::excerpt;
use crate::color::{heatmap_color, sentiment_color};
use crate::config::DashboardConfig;
use crate::data::cache::{InvalidationPolicy, SnapshotCache};
use crate::data::error::{LoadError, Loaded};
use crate::data::news_loader::{NewsLoader, NewsSchema};
use crate::data::raw::first_existing;
use crate::data::registry::ModelRegistry;
use crate::data::sector_loader::SectorLoader;
use crate::domain::{HealthBand, NewsRecord, NewsTable, Outlook, SectorTable, Verdict};
use crate::query::{
    filter_news, latest_for_sector, news_sector_options, sector_history, sector_options,
    split_movers, NewsQuery,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Content excerpt length on home-page cards.
pub const HOME_EXCERPT_CHARS: usize = 120;
/// AI summary excerpt length on home-page cards.
pub const HOME_SUMMARY_CHARS: usize = 150;
/// Content excerpt length in the news center.
pub const CENTER_EXCERPT_CHARS: usize = 200;

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapTile {
    pub sector: String,
    pub health_score: f64,
    /// Tile weight.
    pub news_volume: u32,
    pub outlook: Outlook,
    pub color: String,
}

/// A news item prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsCard {
    pub id: usize,
    pub title: String,
    pub link: String,
    pub source: String,
    pub published_at: Option<NaiveDateTime>,
    pub sentiment_score: f64,
    pub color: String,
    pub sectors: Vec<String>,
    pub excerpt: String,
    pub ai_summary: Option<String>,
}

impl NewsCard {
    /// Build a card, truncating content to `excerpt_chars` and the AI
    /// summary to `summary_chars` when given.
    pub fn from_record(record: &NewsRecord, excerpt_chars: usize, summary_chars: Option<usize>) -> Self {
        let ai_summary = record.has_short_answer().then(|| {
            let summary = record.short_answer.trim();
            match summary_chars {
                Some(limit) => excerpt(summary, limit),
                None => summary.to_string(),
            }
        });

        Self {
            id: record.id,
            title: record.title.clone(),
            link: record.link.clone(),
            source: record.source.clone(),
            published_at: record.published_at,
            sentiment_score: record.sentiment_score,
            color: sentiment_color(record.sentiment_score),
            sectors: record.combined_sectors.clone(),
            excerpt: excerpt(&record.content, excerpt_chars),
            ai_summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    /// Report date of the heatmap snapshot.
    pub as_of: Option<NaiveDate>,
    pub heatmap: Vec<HeatmapTile>,
    pub sector_options: Vec<String>,
    /// News items passing the keyword and sector filters.
    pub match_count: usize,
    pub bullish: Vec<NewsCard>,
    pub bearish: Vec<NewsCard>,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: Option<NaiveDate>,
    pub health_score: f64,
}

/// One model's opinion, ready for a verdict card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictCard {
    pub model_key: String,
    pub nickname: String,
    pub full_name: String,
    pub score: f64,
    pub verdict: Verdict,
    pub label: &'static str,
    pub accent: &'static str,
    /// `None` when the model gave no reasoning.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorDetailView {
    pub sector: String,
    pub sector_options: Vec<String>,
    pub as_of: Option<NaiveDate>,
    pub health_score: f64,
    pub band: HealthBand,
    pub band_color: &'static str,
    pub outlook: Outlook,
    pub news_volume: u32,
    /// Oldest first.
    pub trend: Vec<TrendPoint>,
    pub verdicts: Vec<VerdictCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsCenterView {
    /// Matches before the display limit.
    pub total: usize,
    pub items: Vec<NewsCard>,
    pub sector_options: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// Read-only dashboard over the configured CSV snapshots.
pub struct Dashboard {
    config: DashboardConfig,
    registry: ModelRegistry,
    news_loader: NewsLoader,
    snapshots: SnapshotCache<Loaded<SectorTable>>,
    history: SnapshotCache<Loaded<SectorTable>>,
    news: SnapshotCache<Loaded<NewsTable>>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let policy: InvalidationPolicy = config.cache.into();
        let registry = config.models.registry();
        let news_loader =
            NewsLoader::new(NewsSchema::with_score_rules(config.news.score_columns.clone()));
        tracing::debug!(?policy, "dashboard initialized");

        Self {
            config,
            registry,
            news_loader,
            snapshots: SnapshotCache::new(policy),
            history: SnapshotCache::new(policy),
            news: SnapshotCache::new(policy),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Heatmap plus the bull/bear news split.
    pub fn home(&self, query: &NewsQuery) -> HomeView {
        let sectors = self.sector_snapshot();
        let news = self.news_table(&self.config.data.news_feed());

        let heatmap = sectors
            .table
            .iter()
            .map(|r| HeatmapTile {
                sector: r.sector.clone(),
                health_score: r.health_score,
                news_volume: r.news_volume,
                outlook: r.outlook.clone(),
                color: heatmap_color(r.health_score),
            })
            .collect();

        let movers = split_movers(&news.table, query);
        let take = self.config.news.home_movers;
        let card = |r: &&NewsRecord| NewsCard::from_record(r, HOME_EXCERPT_CHARS, Some(HOME_SUMMARY_CHARS));

        HomeView {
            as_of: sectors.table.latest_date(),
            heatmap,
            sector_options: sector_options(&sectors.table),
            match_count: movers.matched,
            bullish: movers.bullish.iter().take(take).map(card).collect(),
            bearish: movers.bearish.iter().take(take).map(card).collect(),
            diagnostics: collect_diagnostics([sectors.diagnostic(), news.diagnostic()]),
        }
    }

    /// Deep-dive for `sector`, or the first sector alphabetically when
    /// `sector` is absent or unknown. `None` when there is no history.
    pub fn sector_detail(&self, sector: Option<&str>) -> Option<SectorDetailView> {
        let history = self.sector_history();
        let options = sector_options(&history.table);
        let selected = sector
            .and_then(|s| options.iter().find(|o| o.as_str() == s))
            .or_else(|| options.first())?
            .clone();

        let latest = latest_for_sector(&history.table, &selected)?;
        let band = HealthBand::from_score(latest.health_score);
        let trend = sector_history(&history.table, &selected)
            .into_iter()
            .map(|r| TrendPoint {
                date: r.report_date,
                health_score: r.health_score,
            })
            .collect();
        let verdicts = latest
            .model_verdicts
            .iter()
            .map(|v| {
                let info = self.registry.info(&v.model_key);
                let verdict = Verdict::from_score(v.score);
                VerdictCard {
                    model_key: v.model_key.clone(),
                    nickname: info.nickname,
                    full_name: info.full_name,
                    score: v.score,
                    verdict,
                    label: verdict.label(),
                    accent: verdict.accent(),
                    reason: v.reason.clone(),
                }
            })
            .collect();

        Some(SectorDetailView {
            sector: selected,
            sector_options: options,
            as_of: latest.report_date,
            health_score: latest.health_score,
            band,
            band_color: band.color(),
            outlook: latest.outlook.clone(),
            news_volume: latest.news_volume,
            trend,
            verdicts,
        })
    }

    /// Message for a malformed history file, if any.
    pub fn sector_detail_diagnostic(&self) -> Option<String> {
        self.sector_history().diagnostic()
    }

    /// Full news browser: every match newest first, capped at `limit`
    /// (the configured center limit when `None`).
    pub fn news_center(&self, query: &NewsQuery, limit: Option<usize>) -> NewsCenterView {
        let news = self.news_table(&self.config.data.news_archive());
        let hits = filter_news(&news.table, query);
        let limit = limit.unwrap_or(self.config.news.center_limit);

        NewsCenterView {
            total: hits.len(),
            items: hits
                .iter()
                .take(limit)
                .map(|r| NewsCard::from_record(r, CENTER_EXCERPT_CHARS, None))
                .collect(),
            sector_options: news_sector_options(&news.table),
            diagnostics: collect_diagnostics([news.diagnostic()]),
        }
    }

    /// Drop every cached table so the next call re-reads from disk.
    pub fn reload(&self) {
        self.snapshots.clear();
        self.history.clear();
        self.news.clear();
        tracing::info!("dashboard caches cleared");
    }

    fn sector_snapshot(&self) -> Arc<Loaded<SectorTable>> {
        let loader = SectorLoader::snapshot(self.registry.clone());
        self.snapshots
            .get_or_load(&self.config.data.sector_snapshot(), |p| loader.load(p))
    }

    fn sector_history(&self) -> Arc<Loaded<SectorTable>> {
        let candidates = self.config.data.sector_history();
        match first_existing(&candidates) {
            Some(path) => {
                let loader =
                    SectorLoader::history(self.registry.clone(), self.config.sectors.whitelist());
                self.history.get_or_load(path, |p| loader.load(p))
            }
            None => Arc::new(Loaded::failed(LoadError::MissingSource {
                path: candidates.first().cloned().unwrap_or_default(),
            })),
        }
    }

    fn news_table(&self, path: &Path) -> Arc<Loaded<NewsTable>> {
        self.news.get_or_load(path, |p| self.news_loader.load(p))
    }
}

fn collect_diagnostics<const N: usize>(messages: [Option<String>; N]) -> Vec<String> {
    messages.into_iter().flatten().collect()
}

//! Dashboard configuration, loaded from TOML.
//!
//! Every section is optional; the defaults reproduce the layout the
//! upstream pipeline writes (`csv_checkpoint/...`).
//!
//! ```toml
//! [data]
//! root = "/srv/pipeline"
//! news_feed = "csv_checkpoint/sentiment_final.csv"
//!
//! [cache]
//! policy = "ttl"
//! ttl_secs = 300
//!
//! [[news.score_columns]]
//! column = "Score_Qwen2.5-14B-Instruct"
//! scale = 10.0
//!
//! [[models.extra]]
//! key = "Phi"
//! nickname = "Phi-4"
//! full_name = "Suggested by microsoft/phi-4"
//! ```

use crate::data::adapter::ColumnRule;
use crate::data::cache::InvalidationPolicy;
use crate::data::news_loader::default_score_rules;
use crate::data::registry::{ModelInfo, ModelRegistry, DEFAULT_REASON_PREFIX, DEFAULT_SCORE_PREFIX};
use crate::domain::MAIN_SECTORS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataPaths,
    pub cache: CacheConfig,
    pub sectors: SectorConfig,
    pub news: NewsConfig,
    pub models: ModelConfig,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.policy == CachePolicy::Ttl && self.cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid("cache.ttl_secs must be positive".into()));
        }
        if self.news.center_limit == 0 {
            return Err(ConfigError::Invalid("news.center_limit must be positive".into()));
        }
        if let Some(rule) = self.news.score_columns.iter().find(|r| !r.scale.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "score column '{}' has a non-finite scale",
                rule.column
            )));
        }
        Ok(())
    }
}

/// Where the CSV snapshots live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Prefix for every relative path below.
    pub root: Option<PathBuf>,
    /// Heatmap source; only its latest date is shown.
    pub sector_snapshot: PathBuf,
    /// Deep-dive sources, first existing file wins.
    pub sector_history: Vec<PathBuf>,
    /// Home-page news feed.
    pub news_feed: PathBuf,
    /// News-center archive.
    pub news_archive: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            root: None,
            sector_snapshot: PathBuf::from("csv_checkpoint/sector_daily_history_7days.csv"),
            sector_history: vec![
                PathBuf::from("csv_checkpoint/sector_daily_history_enriched.csv"),
                PathBuf::from("sector_daily_history_enriched.csv"),
            ],
            news_feed: PathBuf::from("csv_checkpoint/sentiment_final.csv"),
            news_archive: PathBuf::from("csv_checkpoint/news_summary.csv"),
        }
    }
}

impl DataPaths {
    /// Join `path` onto `root` when both are set and `path` is relative.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn sector_snapshot(&self) -> PathBuf {
        self.resolve(&self.sector_snapshot)
    }

    pub fn sector_history(&self) -> Vec<PathBuf> {
        self.sector_history.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn news_feed(&self) -> PathBuf {
        self.resolve(&self.news_feed)
    }

    pub fn news_archive(&self) -> PathBuf {
        self.resolve(&self.news_archive)
    }
}

/// Which invalidation rule the snapshot caches use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    #[default]
    Manual,
    Ttl,
    ContentHash,
    Modified,
}

/// `[cache]` section. Every key is optional; `ttl_secs` only matters for
/// the `ttl` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub policy: CachePolicy,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: CachePolicy::Manual,
            ttl_secs: 300,
        }
    }
}

impl From<CacheConfig> for InvalidationPolicy {
    fn from(config: CacheConfig) -> Self {
        match config.policy {
            CachePolicy::Manual => InvalidationPolicy::Manual,
            CachePolicy::Ttl => InvalidationPolicy::Ttl(Duration::from_secs(config.ttl_secs)),
            CachePolicy::ContentHash => InvalidationPolicy::ContentHash,
            CachePolicy::Modified => InvalidationPolicy::Modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    /// Sectors shown on the deep-dive screen. Empty disables the filter.
    pub whitelist: Vec<String>,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            whitelist: MAIN_SECTORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SectorConfig {
    pub fn whitelist(&self) -> Option<Vec<String>> {
        (!self.whitelist.is_empty()).then(|| self.whitelist.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Sentiment score columns, highest priority first.
    pub score_columns: Vec<ColumnRule>,
    /// Cards per side in the home-page bull/bear split.
    pub home_movers: usize,
    /// Cards shown in the news center.
    pub center_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            score_columns: default_score_rules(),
            home_movers: 3,
            center_limit: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub reason_prefix: String,
    pub score_prefix: String,
    /// Added to, or replacing, the built-in models.
    pub extra: Vec<ModelInfo>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            reason_prefix: DEFAULT_REASON_PREFIX.to_string(),
            score_prefix: DEFAULT_SCORE_PREFIX.to_string(),
            extra: Vec::new(),
        }
    }
}

impl ModelConfig {
    pub fn registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry {
            reason_prefix: self.reason_prefix.clone(),
            score_prefix: self.score_prefix.clone(),
            ..ModelRegistry::default()
        };
        for info in &self.extra {
            registry.register(info.clone());
        }
        registry
    }
}

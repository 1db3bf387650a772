//! Loading layer: CSV reading, schema reconciliation, model discovery and
//! the snapshot cache.

pub mod adapter;
pub mod cache;
pub mod dates;
pub mod error;
pub mod news_loader;
pub mod raw;
pub mod registry;
pub mod sector_loader;

pub use adapter::{parse_number, BoundField, ColumnRule, FieldSpec};
pub use cache::{CacheStats, Clock, InvalidationPolicy, SnapshotCache, SystemClock};
pub use dates::{parse_date, parse_datetime};
pub use error::{LoadError, Loaded};
pub use news_loader::{
    default_score_rules, load_news_feed, NewsLoader, NewsSchema, NEUTRAL_SENTIMENT,
};
pub use raw::{first_existing, CsvTable, Headers};
pub use registry::{ModelColumns, ModelInfo, ModelRegistry};
pub use sector_loader::{
    load_sector_history, load_sector_snapshots, SectorLoader, SectorSchema, SnapshotMode,
    DEFAULT_HEALTH_SCORE, DEFAULT_NEWS_VOLUME,
};

//! Sentiment Core: normalization, cleaning, coloring and querying for a
//! read-only market-sentiment dashboard.
//!
//! This crate turns pre-computed CSV snapshots into display-ready data:
//! - Schema-tolerant loaders for sector health and news feeds
//! - Wire-service byline stripping and excerpting
//! - Score → color interpolation on a red/yellow/green ramp
//! - Keyword, sector and sentiment-bucket filtering
//! - A snapshot cache with pluggable invalidation
//! - View models for the home, sector deep-dive and news-center screens

pub mod clean;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod query;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{
    Dashboard, HeatmapTile, HomeView, NewsCard, NewsCenterView, SectorDetailView, TrendPoint,
    VerdictCard,
};
pub use data::{LoadError, Loaded};
pub use domain::{NewsRecord, NewsTable, SectorRecord, SectorTable};
pub use query::{NewsQuery, SentimentBucket};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: tables, caches and the dashboard can be shared
    /// across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::SectorRecord>();
        require_sync::<domain::SectorRecord>();
        require_send::<domain::NewsRecord>();
        require_sync::<domain::NewsRecord>();
        require_send::<domain::SectorTable>();
        require_sync::<domain::SectorTable>();
        require_send::<domain::NewsTable>();
        require_sync::<domain::NewsTable>();

        // Loading
        require_send::<data::Loaded<domain::SectorTable>>();
        require_sync::<data::Loaded<domain::SectorTable>>();
        require_send::<data::ModelRegistry>();
        require_sync::<data::ModelRegistry>();
        require_send::<data::SnapshotCache<data::Loaded<domain::NewsTable>>>();
        require_sync::<data::SnapshotCache<data::Loaded<domain::NewsTable>>>();

        // Queries and views
        require_send::<query::NewsQuery>();
        require_sync::<query::NewsQuery>();
        require_send::<dashboard::HomeView>();
        require_sync::<dashboard::HomeView>();
        require_send::<dashboard::Dashboard>();
        require_sync::<dashboard::Dashboard>();
    }
}

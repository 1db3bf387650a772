//! Read-only queries over normalized tables.

pub mod news;
pub mod sector;

pub use news::{
    filter_news, news_sector_options, sort_by_recency, split_movers, MarketMovers, NewsQuery,
    SentimentBucket, BEARISH_MAX, BULLISH_MIN,
};
pub use sector::{latest_for_sector, sector_history, sector_options};

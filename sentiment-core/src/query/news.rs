//! News filtering, bucketing and ordering.
//!
//! Filter axes combine with AND; selected sectors combine with OR. Results
//! are always newest first with undated items last, ties in load order.

use crate::domain::{NewsRecord, NewsTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Scores at or above this are bullish.
pub const BULLISH_MIN: f64 = 6.0;
/// Scores at or below this are bearish.
pub const BEARISH_MAX: f64 = 4.0;

/// Sentiment filter for the news center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    #[default]
    All,
    /// `score >= 6`
    Bullish,
    /// `score <= 4`
    Bearish,
    /// `4 < score < 6`
    Neutral,
}

impl SentimentBucket {
    pub fn contains(&self, score: f64) -> bool {
        match self {
            SentimentBucket::All => true,
            SentimentBucket::Bullish => score >= BULLISH_MIN,
            SentimentBucket::Bearish => score <= BEARISH_MAX,
            SentimentBucket::Neutral => score > BEARISH_MAX && score < BULLISH_MIN,
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentBucket::All => "all",
            SentimentBucket::Bullish => "bullish",
            SentimentBucket::Bearish => "bearish",
            SentimentBucket::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

impl FromStr for SentimentBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SentimentBucket::All),
            "bullish" | "bullish only" => Ok(SentimentBucket::Bullish),
            "bearish" | "bearish only" => Ok(SentimentBucket::Bearish),
            "neutral" => Ok(SentimentBucket::Neutral),
            other => Err(format!("unknown sentiment bucket '{other}'")),
        }
    }
}

/// User-selected news filters. The default query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub bucket: SentimentBucket,
}

impl NewsQuery {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sectors.push(sector.into());
        self
    }

    pub fn bucket(mut self, bucket: SentimentBucket) -> Self {
        self.bucket = bucket;
        self
    }

    /// Keyword and sector predicates only; the bucket is not applied.
    fn matches_text(&self, record: &NewsRecord) -> bool {
        self.matches_keyword(record) && self.matches_sectors(record)
    }

    fn matches_keyword(&self, record: &NewsRecord) -> bool {
        match self.keyword.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                record.title.to_lowercase().contains(&needle)
                    || record.content.to_lowercase().contains(&needle)
            }
        }
    }

    fn matches_sectors(&self, record: &NewsRecord) -> bool {
        let wanted: Vec<String> = self
            .sectors
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() {
            return true;
        }
        record.combined_sectors.iter().any(|tag| {
            let tag = tag.to_lowercase();
            wanted.iter().any(|w| tag.contains(w.as_str()))
        })
    }

    pub fn matches(&self, record: &NewsRecord) -> bool {
        self.matches_text(record) && self.bucket.contains(record.sentiment_score)
    }
}

fn recency(a: &NewsRecord, b: &NewsRecord) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort: newest first, undated last.
pub fn sort_by_recency(records: &mut [&NewsRecord]) {
    records.sort_by(|a, b| recency(a, b));
}

/// Records matching every axis of `query`, newest first.
pub fn filter_news<'a>(table: &'a NewsTable, query: &NewsQuery) -> Vec<&'a NewsRecord> {
    let mut hits: Vec<&NewsRecord> = table.iter().filter(|r| query.matches(r)).collect();
    sort_by_recency(&mut hits);
    hits
}

/// Home-page bull/bear split.
///
/// Scores strictly between the thresholds appear in neither list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketMovers<'a> {
    /// Items passing the keyword and sector filters, before the split.
    pub matched: usize,
    pub bullish: Vec<&'a NewsRecord>,
    pub bearish: Vec<&'a NewsRecord>,
}

/// Apply the keyword and sector filters of `query` and split the result
/// at the bullish/bearish thresholds. The query's bucket is ignored.
pub fn split_movers<'a>(table: &'a NewsTable, query: &NewsQuery) -> MarketMovers<'a> {
    let matched: Vec<&NewsRecord> = table.iter().filter(|r| query.matches_text(r)).collect();
    let mut bullish: Vec<&NewsRecord> = matched
        .iter()
        .copied()
        .filter(|r| SentimentBucket::Bullish.contains(r.sentiment_score))
        .collect();
    let mut bearish: Vec<&NewsRecord> = matched
        .iter()
        .copied()
        .filter(|r| SentimentBucket::Bearish.contains(r.sentiment_score))
        .collect();
    sort_by_recency(&mut bullish);
    sort_by_recency(&mut bearish);

    MarketMovers {
        matched: matched.len(),
        bullish,
        bearish,
    }
}

/// Sorted, de-duplicated sector tags across the feed.
pub fn news_sector_options(table: &NewsTable) -> Vec<String> {
    table
        .iter()
        .flat_map(|r| r.combined_sectors.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

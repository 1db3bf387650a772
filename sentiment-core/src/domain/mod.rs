//! Canonical record types produced by the normalizer.

pub mod news;
pub mod sector;
pub mod verdict;

pub use news::{NewsRecord, NewsTable, GENERAL_SECTOR};
pub use sector::{ModelVerdict, Outlook, SectorRecord, SectorTable, MAIN_SECTORS};
pub use verdict::{HealthBand, Verdict};

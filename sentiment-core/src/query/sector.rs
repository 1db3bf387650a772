//! Sector table queries for the heatmap and deep-dive screens.

use crate::domain::{SectorRecord, SectorTable};
use std::collections::BTreeSet;

/// Sorted, de-duplicated sector names.
pub fn sector_options(table: &SectorTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Rows for one sector, oldest first. Undated rows sort first.
pub fn sector_history<'a>(table: &'a SectorTable, sector: &str) -> Vec<&'a SectorRecord> {
    let mut rows: Vec<&SectorRecord> = table.iter().filter(|r| r.sector == sector).collect();
    rows.sort_by_key(|r| r.report_date);
    rows
}

/// Most recent row for one sector.
pub fn latest_for_sector<'a>(table: &'a SectorTable, sector: &str) -> Option<&'a SectorRecord> {
    sector_history(table, sector).pop()
}

//! Schema adapter: ordered column rules bound against a CSV header.
//!
//! A [`FieldSpec`] names one canonical field and the raw columns that can
//! feed it, in priority order. Binding resolves the columns present in a
//! given file once; evaluation then tries each bound rule per row and
//! stops at the first cell that yields a value.

use super::raw::Headers;
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// One candidate raw column for a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRule {
    pub column: String,
    /// Multiplier applied to numeric values.
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl ColumnRule {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            scale: 1.0,
        }
    }

    pub fn scaled(column: impl Into<String>, scale: f64) -> Self {
        Self {
            column: column.into(),
            scale,
        }
    }
}

/// A canonical field and its candidate columns, highest priority first.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: Vec<ColumnRule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, rules: Vec<ColumnRule>) -> Self {
        Self { name, rules }
    }

    /// Single-column field with no scaling.
    pub fn column(name: &'static str, column: &str) -> Self {
        Self::new(name, vec![ColumnRule::new(column)])
    }

    /// Keep only the rules whose column exists in `headers`.
    pub fn bind(&self, headers: &Headers) -> BoundField {
        let slots = self
            .rules
            .iter()
            .filter_map(|rule| {
                headers.position(&rule.column).map(|index| BoundRule {
                    column: rule.column.clone(),
                    index,
                    scale: rule.scale,
                })
            })
            .collect();
        BoundField {
            name: self.name,
            slots,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BoundRule {
    column: String,
    index: usize,
    scale: f64,
}

/// A [`FieldSpec`] resolved against one file's header.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    name: &'static str,
    slots: Vec<BoundRule>,
}

impl BoundField {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when at least one candidate column is present.
    pub fn is_bound(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Highest-priority column present in the file.
    pub fn primary_column(&self) -> Option<&str> {
        self.slots.first().map(|s| s.column.as_str())
    }

    /// First non-blank cell among the bound columns, trimmed. A literal
    /// `nan` counts as blank.
    pub fn text<'r>(&self, row: &'r StringRecord) -> Option<&'r str> {
        self.slots
            .iter()
            .filter_map(|slot| row.get(slot.index))
            .map(str::trim)
            .find(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
    }

    /// First cell that parses to a finite number, scaled by its rule.
    pub fn number(&self, row: &StringRecord) -> Option<f64> {
        self.slots.iter().find_map(|slot| {
            row.get(slot.index)
                .and_then(parse_number)
                .map(|v| v * slot.scale)
        })
    }

    /// First cell that `parse` accepts.
    pub fn parse_with<T>(&self, row: &StringRecord, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        self.slots
            .iter()
            .find_map(|slot| row.get(slot.index).and_then(&parse))
    }
}

/// Parse a numeric cell. Blank, `nan` and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Headers {
        Headers::new(names.iter())
    }

    fn row(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    fn score_spec() -> FieldSpec {
        FieldSpec::new(
            "sentiment_score",
            vec![
                ColumnRule::scaled("Score_A", 10.0),
                ColumnRule::scaled("Score_B", 10.0),
            ],
        )
    }

    #[test]
    fn bind_keeps_only_present_columns_in_priority_order() {
        let bound = score_spec().bind(&headers(&["Title", "Score_B"]));
        assert!(bound.is_bound());
        assert_eq!(bound.primary_column(), Some("Score_B"));

        let unbound = score_spec().bind(&headers(&["Title"]));
        assert!(!unbound.is_bound());
        assert_eq!(unbound.primary_column(), None);
    }

    #[test]
    fn primary_rule_wins_when_both_present() {
        let h = headers(&["Score_B", "Score_A"]);
        let bound = score_spec().bind(&h);
        assert_eq!(bound.number(&row(&["0.2", "0.5"])), Some(5.0));
    }

    #[test]
    fn falls_through_to_next_rule_on_bad_cell() {
        let bound = score_spec().bind(&headers(&["Score_A", "Score_B"]));
        assert_eq!(bound.number(&row(&["n/a", "0.7"])), Some(7.0));
        assert_eq!(bound.number(&row(&["nan", ""])), None);
    }

    #[test]
    fn text_skips_blank_cells() {
        let spec = FieldSpec::new(
            "outlook",
            vec![ColumnRule::new("Primary"), ColumnRule::new("Fallback")],
        );
        let bound = spec.bind(&headers(&["Primary", "Fallback"]));
        assert_eq!(bound.text(&row(&["  ", " Bullish "])), Some("Bullish"));
        assert_eq!(bound.text(&row(&["", ""])), None);
        assert_eq!(bound.text(&row(&["NaN", "Neutral"])), Some("Neutral"));
        assert_eq!(bound.text(&row(&["nan"])), None);
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number(" 7.25 "), Some(7.25));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("seven"), None);
    }
}

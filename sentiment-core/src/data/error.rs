//! Load errors and the best-effort load outcome.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whole-file failures.
///
/// Column gaps and cell parse failures are not errors: the normalizer
/// absorbs them with documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("malformed CSV {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadError::MissingSource { path } | LoadError::Malformed { path, .. } => path,
        }
    }
}

/// Result of a best-effort load: always a table, plus the failure if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub table: T,
    pub error: Option<LoadError>,
}

impl<T: Default> Loaded<T> {
    pub fn ok(table: T) -> Self {
        Self { table, error: None }
    }

    /// Empty table carrying the failure.
    pub fn failed(error: LoadError) -> Self {
        Self {
            table: T::default(),
            error: Some(error),
        }
    }

    /// Human-readable message for the presentation layer.
    ///
    /// Only malformed files are surfaced; a missing source just renders empty.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.error {
            Some(err @ LoadError::Malformed { .. }) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.error, Some(LoadError::MissingSource { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_not_a_visible_diagnostic() {
        let loaded: Loaded<Vec<u8>> = Loaded::failed(LoadError::MissingSource {
            path: PathBuf::from("/nope.csv"),
        });
        assert!(loaded.table.is_empty());
        assert!(loaded.is_missing());
        assert!(loaded.diagnostic().is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let loaded: Loaded<Vec<u8>> =
            Loaded::failed(LoadError::malformed(Path::new("news.csv"), "bad row 3"));
        let msg = loaded.diagnostic().unwrap();
        assert!(msg.contains("news.csv"));
        assert!(msg.contains("bad row 3"));
    }
}

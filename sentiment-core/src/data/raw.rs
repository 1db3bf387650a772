//! Raw CSV reading: header lookup plus string rows.

use super::error::LoadError;
use csv::StringRecord;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Column-name → index lookup for one CSV header.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Headers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // First occurrence wins on duplicate headers
            index.entry(name.clone()).or_insert(i);
        }
        Self { names, index }
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Column names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A fully read CSV file.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Headers,
    pub rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Read a CSV file. A file that does not exist is `MissingSource`;
    /// any other I/O or parse failure is `Malformed`.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::MissingSource {
                path: path.to_path_buf(),
            },
            _ => LoadError::malformed(path, format!("open failed: {e}")),
        })?;
        Self::from_reader(file, path)
    }

    /// Read CSV data from any reader; `origin` is used for error messages.
    pub fn from_reader<R: io::Read>(reader: R, origin: &Path) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header_record = rdr
            .headers()
            .map_err(|e| LoadError::malformed(origin, format!("header: {e}")))?;
        if header_record.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::malformed(origin, "file has no header row"));
        }
        let headers = Headers::new(header_record.iter());

        // Short rows read as missing trailing cells; long rows have no
        // column to land in.
        let width = headers.names().len();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| LoadError::malformed(origin, e.to_string()))?;
            if record.len() > width {
                let line = record.position().map_or(0, |p| p.line());
                return Err(LoadError::malformed(
                    origin,
                    format!("line {line} has {} fields, header has {width}", record.len()),
                ));
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }
}

/// First candidate path that exists on disk.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates.iter().map(PathBuf::as_path).find(|p| p.exists())
}

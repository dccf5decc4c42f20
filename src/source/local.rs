//! CSV file on disk

use super::RowSource;
use crate::error::{ReportError, ReportResult};
use crate::models::Observations;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
    delimiter: u8,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for LocalFileSource {
    fn location(&self) -> String {
        self.path().display().to_string()
    }

    fn fetch(&self, column: &str) -> ReportResult<Observations> {
        let file = File::open(&self.path)
            .map_err(|e| ReportError::source_unavailable(self.location(), e))?;
        read_column(file, column, self.delimiter, &self.location())
    }
}

/// Header cells may carry a UTF-8 BOM or padding from spreadsheet exports
pub(super) fn clean_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Read one column out of CSV data with a header row.
///
/// Rows shorter than the header and empty cells yield `None`.
pub(crate) fn read_column<R: Read>(
    reader: R,
    column: &str,
    delimiter: u8,
    location: &str,
) -> ReportResult<Observations> {
    let column = column.trim();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ReportError::unexpected(format!("reading the header row of {location}"), e))?
        .clone();

    let Some(index) = headers.iter().position(|h| clean_header(h) == column) else {
        return Err(ReportError::MissingColumn {
            column: column.to_string(),
            location: location.to_string(),
            available: headers.iter().map(|h| clean_header(h).to_string()).collect(),
        });
    };

    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // +2: one-based, after the header line
        let record = record
            .map_err(|e| ReportError::unexpected(format!("reading row {} of {location}", i + 2), e))?;
        values.push(record.get(index).filter(|v| !v.is_empty()).map(str::to_string));
    }

    debug!(
        rows = values.len(),
        missing = values.iter().filter(|v| v.is_none()).count(),
        "Read column '{}' from {}",
        column,
        location
    );
    Ok(Observations::new(column, values))
}

//! Spreadsheet workbook on disk
//!
//! Reads one sheet (the first unless named) with calamine. The first row of
//! the sheet's used range is the header row.

use super::local::clean_header;
use super::RowSource;
use crate::error::{ReportError, ReportResult};
use crate::models::Observations;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions read as workbooks instead of CSV
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` names a spreadsheet workbook, by extension
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: None,
        }
    }

    /// Read the named sheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    fn load_range(&self) -> ReportResult<Range<Data>> {
        let location = self.location();

        // Open failures are the source being unavailable; anything after is a bad workbook
        File::open(&self.path).map_err(|e| ReportError::source_unavailable(&location, e))?;
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| ReportError::unexpected(format!("opening workbook {location}"), e))?;

        let range = match &self.sheet {
            Some(name) => {
                let names = workbook.sheet_names();
                if !names.iter().any(|n| n == name) {
                    return Err(ReportError::unexpected(
                        format!("selecting a sheet of {location}"),
                        format!("no sheet named '{}' (sheets: {})", name, names.join(", ")),
                    ));
                }
                workbook.worksheet_range(name)
            }
            None => workbook.worksheet_range_at(0).ok_or_else(|| {
                ReportError::unexpected(format!("reading {location}"), "workbook has no sheets")
            })?,
        };

        range.map_err(|e| ReportError::unexpected(format!("reading a sheet of {location}"), e))
    }
}

impl RowSource for WorkbookSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self, column: &str) -> ReportResult<Observations> {
        let range = self.load_range()?;
        read_column(&range, column, &self.location())
    }
}

/// Blank and empty-string cells are missing values
fn cell_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read one column out of a sheet whose first used row is the header row
fn read_column(range: &Range<Data>, column: &str, location: &str) -> ReportResult<Observations> {
    let column = column.trim();
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| clean_header(&cell.to_string()).to_string())
                .collect()
        })
        .unwrap_or_default();

    let Some(index) = headers.iter().position(|h| h == column) else {
        return Err(ReportError::MissingColumn {
            column: column.to_string(),
            location: location.to_string(),
            available: headers,
        });
    };

    let values: Vec<Option<String>> = rows
        .map(|row| row.get(index).and_then(cell_value))
        .collect();

    debug!(
        rows = values.len(),
        missing = values.iter().filter(|v| v.is_none()).count(),
        "Read column '{}' from {}",
        column,
        location
    );
    Ok(Observations::new(column, values))
}

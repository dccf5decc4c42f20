//! Row sources
//!
//! A [`RowSource`] yields the raw values of one column. The summarizer never
//! knows where they came from:
//! - [`LocalFileSource`] - CSV file on disk
//! - [`WorkbookSource`] - spreadsheet workbook on disk (.xlsx and friends)
//! - [`RemoteSource`] - CSV downloaded over HTTP, then read like a local file
//! - [`StaticRows`] - rows already in memory
//!
//! [`from_config`] picks the strategy from the `[source]` config section.

mod local;
mod remote;
mod workbook;

pub use local::LocalFileSource;
pub use remote::RemoteSource;
pub use workbook::{is_workbook_path, WorkbookSource};

use crate::config::{SourceConfig, SourceKind};
use crate::error::{ReportError, ReportResult};
use crate::models::Observations;
use anyhow::{bail, Result};

/// Capability to fetch the raw values of a labelled column
pub trait RowSource {
    /// Path or URL, used in log lines and error messages
    fn location(&self) -> String;

    /// Read every row's value for `column`
    fn fetch(&self, column: &str) -> ReportResult<Observations>;
}

/// Rows held in memory, for library callers and tests
#[derive(Debug, Clone)]
pub struct StaticRows {
    column: String,
    values: Vec<Option<String>>,
}

impl StaticRows {
    pub fn new(column: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }
}

impl RowSource for StaticRows {
    fn location(&self) -> String {
        "in-memory rows".to_string()
    }

    fn fetch(&self, column: &str) -> ReportResult<Observations> {
        if self.column != column {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
                location: self.location(),
                available: vec![self.column.clone()],
            });
        }
        Ok(Observations::new(self.column.clone(), self.values.clone()))
    }
}

/// Build the row source selected by configuration.
///
/// A local path with a workbook extension is read as a workbook.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn RowSource>> {
    let delimiter = config.delimiter_byte()?;
    match config.kind {
        SourceKind::Xlsx => Ok(Box::new(
            WorkbookSource::new(&config.path).with_sheet(config.sheet.clone()),
        )),
        SourceKind::Local if is_workbook_path(&config.path) => Ok(Box::new(
            WorkbookSource::new(&config.path).with_sheet(config.sheet.clone()),
        )),
        SourceKind::Local => Ok(Box::new(
            LocalFileSource::new(&config.path).with_delimiter(delimiter),
        )),
        SourceKind::Remote => {
            let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
                bail!("Remote source selected but no URL configured (set [source] url or pass --url)");
            };
            Ok(Box::new(
                RemoteSource::new(url, config.download_dir())
                    .with_timeout(config.timeout())
                    .with_delimiter(delimiter),
            ))
        }
    }
}

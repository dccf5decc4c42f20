//! Error taxonomy for report generation
//!
//! Every failure that ends a run falls into one of three kinds:
//! - `MissingColumn` - the label column is not in the header row
//! - `SourceUnavailable` - the file or URL could not be read
//! - `Unexpected` - anything else (malformed rows, write failures, ...)

use thiserror::Error;

/// Boxed underlying cause of a source failure
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can end a report run
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Column '{column}' not found in {location} (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        location: String,
        available: Vec<String>,
    },

    #[error("Source unavailable: could not read {location}: {source}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Unexpected error while {context}: {message}")]
    Unexpected { context: String, message: String },
}

impl ReportError {
    pub fn source_unavailable(location: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        ReportError::SourceUnavailable {
            location: location.into(),
            source: cause.into(),
        }
    }

    pub fn unexpected(context: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ReportError::Unexpected {
            context: context.into(),
            message: cause.to_string(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::MissingColumn { .. } => "missing-column",
            ReportError::SourceUnavailable { .. } => "source-unavailable",
            ReportError::Unexpected { .. } => "unexpected",
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

//! placefreq - frequency statistics for categorical place data
//!
//! Reads one labelled column from a CSV file (local or downloaded),
//! normalizes the labels, and summarizes how often each one occurs:
//! mean/median/std of the per-row frequencies, representative labels,
//! quartiles, Tukey fences and the rows outside them. Reports render as
//! text, JSON, Markdown or an HTML dashboard with SVG charts.
//!
//! ```
//! use placefreq::{models::Observations, stats::summarize};
//!
//! let obs = Observations::from_strs("Place", ["Library", " library ", "Cafe"]);
//! let report = summarize(&obs);
//! assert_eq!(report.statistics.mode.as_deref(), Some("Library"));
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod reporters;
pub mod source;
pub mod stats;

pub use error::{ReportError, ReportResult};
pub use models::{FrequencyReport, Observations, Outlier, SummaryStatistics};
pub use source::RowSource;
pub use stats::{generate_report, summarize};

//! Core data models for placefreq
//!
//! `Observations` is what a row source hands to the summarizer;
//! `FrequencyReport` is what the summarizer hands to the reporters.
//! Both are plain data: nothing here is mutated after construction.

use crate::stats::FrequencyTable;
use serde::{Deserialize, Serialize};

/// Raw values of one column, one entry per input row (`None` = missing cell)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observations {
    column: String,
    values: Vec<Option<String>>,
}

impl Observations {
    pub fn new(column: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }

    /// Build from present values only (no missing cells)
    pub fn from_strs<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(column, values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Scalar statistics over the per-row frequency series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Most frequent label; ties go to the first label encountered
    pub mode: Option<String>,
    /// Label whose count is nearest the mean
    pub mean_label: Option<String>,
    /// Label whose count is nearest the median
    pub median_label: Option<String>,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// A row whose per-row frequency lies outside the fences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlier {
    /// Zero-based row index in the observation set
    pub row: usize,
    pub label: String,
    pub frequency: usize,
}

/// Everything one run produces, ready for text display and charting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub column: String,
    pub total: usize,
    /// Normalized label per row
    pub labels: Vec<String>,
    /// Frequency-table count of each row's own label
    pub row_frequencies: Vec<usize>,
    pub frequency_table: FrequencyTable,
    pub statistics: SummaryStatistics,
    pub outliers: Vec<Outlier>,
}

impl FrequencyReport {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}

/// How a label is shown to humans; missing cells normalize to ""
pub fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "(empty)"
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label(""), "(empty)");
        assert_eq!(display_label("Park"), "Park");
    }

    #[test]
    fn test_report_flags() {
        let report = FrequencyReport::default();
        assert!(report.is_empty());
        assert!(!report.has_outliers());
    }
}

//! Frequency statistics summarizer
//!
//! Turns a column of raw labels into a [`FrequencyReport`]:
//!
//! 1. normalize every label (trim, capitalize, missing -> "")
//! 2. count labels into a [`FrequencyTable`]
//! 3. annotate every row with its own label's count
//! 4. mean / median / sample std dev / mode over that per-row series
//! 5. pick the labels nearest the mean and the median
//! 6. quartiles and Tukey fences over the per-row series
//! 7. collect rows strictly outside the fences
//!
//! The per-row series is the analysis variable: a label seen 40 times
//! contributes 40 values of 40, so frequent labels dominate the quartiles.

mod descriptive;
mod frequency;
mod normalize;

pub use descriptive::{mean, median, quantile, sample_std_dev, TukeyFences, FENCE_MULTIPLIER};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use normalize::{normalize_all, normalize_label};

use crate::error::ReportResult;
use crate::models::{FrequencyReport, Observations, Outlier, SummaryStatistics};
use crate::source::RowSource;
use tracing::{debug, info};

/// Count of each row's own label, aligned 1:1 with `labels`
pub fn annotate(labels: &[String], table: &FrequencyTable) -> Vec<usize> {
    let counts = table.counts_by_label();
    labels
        .iter()
        .map(|label| counts.get(label.as_str()).copied().unwrap_or(0))
        .collect()
}

/// Compute the full report for one observation set
pub fn summarize(observations: &Observations) -> FrequencyReport {
    let labels = normalize_all(observations);
    let table = FrequencyTable::from_labels(&labels);
    let row_frequencies = annotate(&labels, &table);

    let series: Vec<f64> = row_frequencies.iter().map(|&c| c as f64).collect();
    let mut sorted = series.clone();
    sorted.sort_by(f64::total_cmp);

    let mean = descriptive::mean(&series);
    let median = descriptive::median(&sorted);
    let fences = TukeyFences::from_sorted(&sorted);

    let outliers: Vec<Outlier> = labels
        .iter()
        .zip(&row_frequencies)
        .enumerate()
        .filter(|(_, (_, frequency))| fences.is_outlier(**frequency as f64))
        .map(|(row, (label, &frequency))| Outlier {
            row,
            label: label.clone(),
            frequency,
        })
        .collect();

    let statistics = SummaryStatistics {
        mean,
        median,
        std_dev: descriptive::sample_std_dev(&series),
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        mode: table.mode().map(|e| e.label.clone()),
        mean_label: table.nearest(mean).map(|e| e.label.clone()),
        median_label: table.nearest(median).map(|e| e.label.clone()),
        q1: fences.q1,
        q3: fences.q3,
        iqr: fences.iqr,
        lower_fence: fences.lower,
        upper_fence: fences.upper,
    };

    debug!(
        rows = labels.len(),
        distinct = table.len(),
        outliers = outliers.len(),
        "Summarized column '{}'",
        observations.column()
    );

    FrequencyReport {
        column: observations.column().to_string(),
        total: labels.len(),
        labels,
        row_frequencies,
        frequency_table: table,
        statistics,
        outliers,
    }
}

/// Fetch the label column from `source` and summarize it
pub fn generate_report(source: &dyn RowSource, column: &str) -> ReportResult<FrequencyReport> {
    info!("Reading column '{}' from {}", column, source.location());
    let observations = source.fetch(column)?;
    info!("Loaded {} rows", observations.len());
    Ok(summarize(&observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticRows;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn observations(labels: &[&str]) -> Observations {
        Observations::from_strs("Place", labels.iter().copied())
    }

    /// `counts` as (label, repetitions), emitted in order
    fn repeated(counts: &[(&str, usize)]) -> Observations {
        let labels: Vec<&str> = counts
            .iter()
            .flat_map(|&(label, n)| std::iter::repeat(label).take(n))
            .collect();
        observations(&labels)
    }

    #[test]
    fn test_library_cafe_scenario() {
        let obs = observations(&["Library", " library ", "Cafe", "library", "Cafe", "Cafe"]);
        let report = summarize(&obs);

        assert_eq!(
            report.labels,
            vec!["Library", "Library", "Cafe", "Library", "Cafe", "Cafe"]
        );
        assert_eq!(report.total, 6);
        assert_eq!(report.frequency_table.count("Library"), Some(3));
        assert_eq!(report.frequency_table.count("Cafe"), Some(3));
        assert_eq!(report.frequency_table.len(), 2);

        let stats = &report.statistics;
        assert_eq!(stats.mode.as_deref(), Some("Library"));
        assert!(approx(stats.mean, 3.0));
        assert!(approx(stats.std_dev, 0.0));
        assert!(report.outliers.is_empty());
    }

    #[test]
    fn test_singleton_outside_fences() {
        // Per-row series: one 1, nine 9s, ten 10s -> Q1 = 9, Q3 = 10, fences [7.5, 11.5]
        let obs = repeated(&[("Park", 10), ("Museum", 9), ("Zoo", 1)]);
        let report = summarize(&obs);
        let stats = &report.statistics;

        assert!(approx(stats.q1, 9.0));
        assert!(approx(stats.q3, 10.0));
        assert!(approx(stats.iqr, 1.0));
        assert!(approx(stats.lower_fence, 7.5));
        assert!(approx(stats.upper_fence, 11.5));
        assert!(approx(stats.mean, 9.1));
        assert!(approx(stats.median, 9.5));

        assert_eq!(
            report.outliers,
            vec![Outlier {
                row: 19,
                label: "Zoo".into(),
                frequency: 1
            }]
        );
        assert_eq!(stats.mean_label.as_deref(), Some("Museum"));
        assert_eq!(stats.median_label.as_deref(), Some("Park"));
    }

    #[test]
    fn test_singleton_inside_fences() {
        // Per-row series: one 1, five 5s, six 6s, eight 8s -> Q1 = 5, Q3 = 8, fences [0.5, 12.5]
        let obs = repeated(&[("Park", 8), ("Museum", 6), ("Beach", 5), ("Zoo", 1)]);
        let report = summarize(&obs);
        let stats = &report.statistics;

        assert_eq!(report.total, 20);
        assert!(approx(stats.q1, 5.0));
        assert!(approx(stats.q3, 8.0));
        assert!(approx(stats.lower_fence, 0.5));
        assert!(approx(stats.upper_fence, 12.5));
        assert!(report.outliers.is_empty());
    }

    #[test]
    fn test_outliers_match_fence_definition() {
        let obs = repeated(&[("A", 30), ("B", 2), ("C", 2), ("D", 1), ("E", 3)]);
        let report = summarize(&obs);
        let stats = &report.statistics;

        let expected: Vec<usize> = report
            .row_frequencies
            .iter()
            .enumerate()
            .filter(|&(_, &f)| (f as f64) < stats.lower_fence || (f as f64) > stats.upper_fence)
            .map(|(row, _)| row)
            .collect();
        let actual: Vec<usize> = report.outliers.iter().map(|o| o.row).collect();
        assert_eq!(actual, expected);
        assert!(!actual.is_empty());
        for outlier in &report.outliers {
            assert_eq!(report.labels[outlier.row], outlier.label);
        }
    }

    #[test]
    fn test_counts_sum_to_total_and_annotation_is_consistent() {
        let obs = Observations::new(
            "Place",
            vec![
                Some("Park".into()),
                None,
                Some(" park".into()),
                Some("".into()),
                Some("Cafe".into()),
            ],
        );
        let report = summarize(&obs);

        assert_eq!(report.frequency_table.total(), report.total);
        assert_eq!(report.frequency_table.count(""), Some(2));
        for (label, &freq) in report.labels.iter().zip(&report.row_frequencies) {
            assert_eq!(report.frequency_table.count(label), Some(freq));
        }
    }

    #[test]
    fn test_quartile_ordering() {
        let datasets = [
            repeated(&[("A", 1)]),
            repeated(&[("A", 3), ("B", 1)]),
            repeated(&[("A", 12), ("B", 7), ("C", 7), ("D", 2), ("E", 1)]),
            repeated(&[("A", 1), ("B", 1), ("C", 1), ("D", 50)]),
        ];
        for obs in &datasets {
            let s = summarize(obs).statistics;
            assert!(s.lower_fence >= 0.0);
            assert!(s.lower_fence <= s.q1);
            assert!(s.q1 <= s.median);
            assert!(s.median <= s.q3);
            assert!(s.q3 <= s.upper_fence);
        }
    }

    #[test]
    fn test_single_distinct_label() {
        let obs = observations(&["Park", "park", " PARK "]);
        let report = summarize(&obs);
        let s = &report.statistics;

        assert_eq!(report.total, 3);
        assert!(approx(s.mean, 3.0));
        assert!(approx(s.median, 3.0));
        assert!(approx(s.q1, 3.0));
        assert!(approx(s.q3, 3.0));
        assert!(approx(s.iqr, 0.0));
        assert!(approx(s.lower_fence, 3.0));
        assert!(approx(s.upper_fence, 3.0));
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.mode.as_deref(), Some("Park"));
        assert_eq!(s.mean_label.as_deref(), Some("Park"));
        assert_eq!(s.median_label.as_deref(), Some("Park"));
        assert!(report.outliers.is_empty());
    }

    #[test]
    fn test_single_row() {
        let report = summarize(&observations(&["Cafe"]));
        let s = &report.statistics;
        assert_eq!(report.total, 1);
        assert!(approx(s.mean, 1.0));
        assert_eq!(s.std_dev, 0.0);
        assert!(report.outliers.is_empty());
    }

    #[test]
    fn test_empty_observations() {
        let report = summarize(&Observations::new("Place", vec![]));
        assert_eq!(report.total, 0);
        assert!(report.is_empty());
        assert!(report.frequency_table.is_empty());
        assert!(report.outliers.is_empty());
        assert_eq!(report.statistics, SummaryStatistics::default());
        assert_eq!(report.column, "Place");
    }

    #[test]
    fn test_deterministic_output() {
        let obs = repeated(&[("Zoo", 4), ("Cafe", 4), ("Park", 2), ("Beach", 1)]);
        let first = serde_json::to_string(&summarize(&obs)).expect("serialize");
        let second = serde_json::to_string(&summarize(&obs)).expect("serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_not_mutated() {
        let obs = observations(&[" park ", "CAFE"]);
        let before = obs.clone();
        let _ = summarize(&obs);
        assert_eq!(obs, before);
    }

    #[test]
    fn test_generate_report_from_static_rows() {
        let source = StaticRows::new("Place", vec![Some("Cafe".into()), Some("cafe".into())]);
        let report = generate_report(&source, "Place").expect("report");
        assert_eq!(report.total, 2);
        assert_eq!(report.statistics.mode.as_deref(), Some("Cafe"));
    }

    #[test]
    fn test_generate_report_missing_column() {
        let source = StaticRows::new("Place", vec![Some("Cafe".into())]);
        let err = generate_report(&source, "Lugar").expect_err("missing column");
        assert_eq!(err.kind(), "missing-column");
    }
}

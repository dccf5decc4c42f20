//! Text (terminal) reporter with colors and formatting

use super::{fixed, label_or_na, percent};
use crate::models::{display_label, FrequencyReport};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

/// Longest label shown before truncation
const MAX_LABEL_WIDTH: usize = 30;

/// Render report as formatted terminal output
pub fn render(report: &FrequencyReport) -> Result<String> {
    let stats = &report.statistics;
    let mut out = String::new();

    // Header
    out.push_str(&format!(
        "\n{BOLD}{} frequency report{RESET}\n",
        report.column
    ));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    // Statistics block
    out.push_str(&format!("Mode: {}\n", label_or_na(stats.mode.as_deref())));
    out.push_str(&format!("Total rows: {}\n", report.total));
    out.push_str(&format!(
        "Mean frequency: {} ({})\n",
        fixed(stats.mean),
        label_or_na(stats.mean_label.as_deref())
    ));
    out.push_str(&format!(
        "Median frequency: {} ({})\n",
        fixed(stats.median),
        label_or_na(stats.median_label.as_deref())
    ));
    out.push_str(&format!("Std deviation: {}\n", fixed(stats.std_dev)));
    out.push_str(&format!(
        "Q1: {}  Q3: {}  IQR: {}\n",
        fixed(stats.q1),
        fixed(stats.q3),
        fixed(stats.iqr)
    ));
    out.push_str(&format!(
        "Lower fence: {}  Upper fence: {}\n\n",
        fixed(stats.lower_fence),
        fixed(stats.upper_fence)
    ));

    // Outliers
    out.push_str(&format!(
        "{BOLD}OUTLIERS{RESET} ({} rows)\n",
        report.outliers.len()
    ));
    if report.has_outliers() {
        out.push_str(&format!("{DIM}  ROW    FREQ  LABEL{RESET}\n"));
        for outlier in &report.outliers {
            out.push_str(&format!(
                "  {:>5}  {RED}{:>4}{RESET}  {}\n",
                outlier.row + 1,
                outlier.frequency,
                truncate(display_label(&outlier.label))
            ));
        }
    } else {
        out.push_str(&format!("  {GREEN}No outliers found.{RESET}\n"));
    }
    out.push('\n');

    // Ranked frequencies
    let ranked = report.frequency_table.ranked();
    out.push_str(&format!(
        "{BOLD}FREQUENCIES{RESET} ({} distinct)\n",
        ranked.len()
    ));
    let width = ranked
        .iter()
        .map(|e| truncate(display_label(&e.label)).chars().count())
        .max()
        .unwrap_or(0);
    for entry in ranked {
        let label = truncate(display_label(&entry.label));
        let pad = width - label.chars().count();
        out.push_str(&format!(
            "  {}{}  {:>5}  {DIM}{:>5.1}%{RESET}\n",
            label,
            " ".repeat(pad),
            entry.count,
            percent(entry.count, report.total)
        ));
    }

    Ok(out)
}

/// Truncate long labels -- use chars() to stay on UTF-8 boundaries
fn truncate(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_WIDTH {
        let head: String = label.chars().take(MAX_LABEL_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observations;
    use crate::reporters::tests::{empty_report, test_report};
    use crate::stats::summarize;

    #[test]
    fn test_text_statistics_block() {
        let out = render(&test_report()).unwrap();
        assert!(out.contains("Place frequency report"));
        assert!(out.contains("Mode: Park"));
        assert!(out.contains("Total rows: 20"));
        assert!(out.contains("Mean frequency: 9.10 (Museum)"));
        assert!(out.contains("Median frequency: 9.50 (Park)"));
        assert!(out.contains("Q1: 9.00  Q3: 10.00  IQR: 1.00"));
        assert!(out.contains("Lower fence: 7.50  Upper fence: 11.50"));
    }

    #[test]
    fn test_text_lists_outliers() {
        let out = render(&test_report()).unwrap();
        assert!(out.contains("OUTLIERS"));
        assert!(out.contains("Zoo"));
        assert!(!out.contains("No outliers found."));
    }

    #[test]
    fn test_text_no_outliers_message() {
        let report = summarize(&Observations::from_strs(
            "Place",
            ["Library", " library ", "Cafe", "library", "Cafe", "Cafe"],
        ));
        let out = render(&report).unwrap();
        assert!(out.contains("No outliers found."));
    }

    #[test]
    fn test_text_frequencies_are_ranked() {
        let out = render(&test_report()).unwrap();
        let park = out.rfind("Park").unwrap();
        let museum = out.rfind("Museum").unwrap();
        let zoo = out.rfind("Zoo").unwrap();
        assert!(park < museum && museum < zoo);
        assert!(out.contains("50.0%"));
    }

    #[test]
    fn test_text_empty_report() {
        let out = render(&empty_report()).unwrap();
        assert!(out.contains("Mode: N/A"));
        assert!(out.contains("Total rows: 0"));
        assert!(out.contains("No outliers found."));
    }

    #[test]
    fn test_truncate_long_labels() {
        let long = "é".repeat(40);
        let shown = truncate(&long);
        assert_eq!(shown.chars().count(), MAX_LABEL_WIDTH);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate("Park"), "Park");
    }
}

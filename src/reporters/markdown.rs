//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Same sections as the text report, as tables. Charts are not embedded;
//! use `--charts-dir` and link the SVG files if they are needed.

use super::{fixed, label_or_na, percent};
use crate::models::{display_label, FrequencyReport};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &FrequencyReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_statistics(report));
    md.push('\n');

    md.push_str(&render_outliers(report));
    md.push('\n');

    md.push_str(&render_frequencies(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &FrequencyReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# 📊 {} Frequency Report

**Most frequent: {}** | **Rows: {}**

Generated: {}
"#,
        escape_cell(&report.column),
        escape_cell(label_or_na(report.statistics.mode.as_deref())),
        report.total,
        timestamp
    )
}

fn render_statistics(report: &FrequencyReport) -> String {
    let stats = &report.statistics;

    format!(
        r#"## Summary Statistics

| Statistic | Value | Label |
|-----------|-------|-------|
| Mode | | {} |
| Total rows | {} | |
| Mean frequency | {} | {} |
| Median frequency | {} | {} |
| Std deviation | {} | |
| Q1 | {} | |
| Q3 | {} | |
| IQR | {} | |
| Lower fence | {} | |
| Upper fence | {} | |
"#,
        escape_cell(label_or_na(stats.mode.as_deref())),
        report.total,
        fixed(stats.mean),
        escape_cell(label_or_na(stats.mean_label.as_deref())),
        fixed(stats.median),
        escape_cell(label_or_na(stats.median_label.as_deref())),
        fixed(stats.std_dev),
        fixed(stats.q1),
        fixed(stats.q3),
        fixed(stats.iqr),
        fixed(stats.lower_fence),
        fixed(stats.upper_fence)
    )
}

fn render_outliers(report: &FrequencyReport) -> String {
    let mut md = String::from("## Outliers\n\n");

    if !report.has_outliers() {
        md.push_str("✅ No outliers found.\n");
        return md;
    }

    md.push_str("| Row | Label | Frequency |\n");
    md.push_str("|-----|-------|-----------|\n");
    for outlier in &report.outliers {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            outlier.row + 1,
            escape_cell(display_label(&outlier.label)),
            outlier.frequency
        ));
    }
    md
}

fn render_frequencies(report: &FrequencyReport) -> String {
    let mut md = String::from("## Frequencies\n\n");
    md.push_str("| # | Label | Count | Share |\n");
    md.push_str("|---|-------|-------|-------|\n");
    for (i, entry) in report.frequency_table.ranked().into_iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {:.1}% |\n",
            i + 1,
            escape_cell(display_label(&entry.label)),
            entry.count,
            percent(entry.count, report.total)
        ));
    }
    md
}

fn render_footer() -> String {
    r#"---

*Generated by placefreq*
"#
    .to_string()
}

/// Pipes would split a table cell
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

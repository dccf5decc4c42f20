//! HTML reporter with embedded styles and charts
//!
//! Generates a standalone HTML dashboard that can be viewed in any browser.
//! Includes:
//! - Statistics cards (mode, totals, central tendency, fences)
//! - Outlier table
//! - Ranked frequency table with share bars
//! - The five SVG charts, inlined

use super::{fixed, label_or_na, percent};
use crate::charts::{self, Chart};
use crate::models::{display_label, FrequencyReport};
use anyhow::Result;
use chrono::Local;

/// Render report as standalone HTML
pub fn render(report: &FrequencyReport) -> Result<String> {
    let charts = charts::render_all(report)?;
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report));

    html.push_str("<div class=\"content\">\n");
    html.push_str(&render_statistics(report));
    html.push_str(&render_outliers(report));
    html.push_str(&render_frequency_table(report));
    html.push_str(&render_charts(&charts));
    html.push_str("</div>\n"); // content

    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(report: &FrequencyReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} frequency report</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&report.column)
    )
}

fn render_header(report: &FrequencyReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<div class="header">
    <h1>📊 {} Frequency Analysis</h1>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        html_escape(&report.column),
        timestamp
    )
}

fn stat_card(title: &str, value: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!("\n            <div class=\"stat-detail\">{}</div>", html_escape(d)))
        .unwrap_or_default();
    format!(
        r#"        <div class="stat-item">
            <div class="stat-label">{}</div>
            <div class="stat-value">{}</div>{}
        </div>
"#,
        title,
        html_escape(value),
        detail
    )
}

fn render_statistics(report: &FrequencyReport) -> String {
    let stats = &report.statistics;
    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Summary Statistics</h2>
    <div class="stats-grid">
"#,
    );

    html.push_str(&stat_card("Most frequent", label_or_na(stats.mode.as_deref()), None));
    html.push_str(&stat_card("Total rows", &report.total.to_string(), None));
    html.push_str(&stat_card(
        "Mean frequency",
        &fixed(stats.mean),
        Some(label_or_na(stats.mean_label.as_deref())),
    ));
    html.push_str(&stat_card(
        "Median frequency",
        &fixed(stats.median),
        Some(label_or_na(stats.median_label.as_deref())),
    ));
    html.push_str(&stat_card("Std deviation", &fixed(stats.std_dev), None));
    html.push_str(&stat_card("Q1", &fixed(stats.q1), None));
    html.push_str(&stat_card("Q3", &fixed(stats.q3), None));
    html.push_str(&stat_card("IQR", &fixed(stats.iqr), None));
    html.push_str(&stat_card("Lower fence", &fixed(stats.lower_fence), None));
    html.push_str(&stat_card("Upper fence", &fixed(stats.upper_fence), None));

    html.push_str("    </div>\n</div>\n");
    html
}

fn render_outliers(report: &FrequencyReport) -> String {
    if !report.has_outliers() {
        return r#"<div class="section">
    <h2 class="section-title">Outliers</h2>
    <p class="empty-note">No outliers found.</p>
</div>
"#
        .to_string();
    }

    let mut html = format!(
        r#"<div class="section">
    <h2 class="section-title">Outliers ({} rows)</h2>
    <table>
        <thead><tr><th>Row</th><th>Label</th><th>Frequency</th></tr></thead>
        <tbody>
"#,
        report.outliers.len()
    );
    for outlier in &report.outliers {
        html.push_str(&format!(
            "            <tr class=\"outlier\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            outlier.row + 1,
            html_escape(display_label(&outlier.label)),
            outlier.frequency
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_frequency_table(report: &FrequencyReport) -> String {
    let ranked = report.frequency_table.ranked();
    let mut html = format!(
        r#"<div class="section">
    <h2 class="section-title">Frequencies ({} distinct)</h2>
    <table>
        <thead><tr><th>Label</th><th>Count</th><th>Share</th></tr></thead>
        <tbody>
"#,
        ranked.len()
    );
    for entry in ranked {
        let share = percent(entry.count, report.total);
        html.push_str(&format!(
            r#"            <tr><td>{}</td><td>{}</td><td><div class="share-bar"><div class="share-bar-fill" style="width: {:.1}%"></div></div>{:.1}%</td></tr>
"#,
            html_escape(display_label(&entry.label)),
            entry.count,
            share,
            share
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_charts(charts: &[Chart]) -> String {
    if charts.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Charts</h2>
    <div class="charts">
"#,
    );
    for chart in charts {
        html.push_str(&format!(
            "        <figure class=\"chart\" id=\"{}\">\n{}\n        </figure>\n",
            chart.kind.file_name().trim_end_matches(".svg"),
            chart.svg
        ));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by placefreq</p>
</div>
"#
    .to_string()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #6366f1;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%);
    color: white;
    padding: 3rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; }
.header .timestamp { opacity: 0.9; font-size: 0.95rem; }

.content { padding: 2rem; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 1rem;
}

.stat-item {
    background: var(--card-background);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.stat-label {
    font-size: 0.875rem;
    color: #64748b;
    text-transform: uppercase;
}

.stat-value { font-size: 1.75rem; font-weight: bold; }
.stat-detail { color: #64748b; font-style: italic; }

table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid var(--border-color); }
th { background: #f1f5f9; font-size: 0.875rem; text-transform: uppercase; color: #64748b; }
tr.outlier td { color: #dc2626; font-weight: 600; }

.share-bar {
    display: inline-block;
    width: 120px;
    height: 8px;
    background: var(--border-color);
    border-radius: 4px;
    margin-right: 0.5rem;
    overflow: hidden;
}

.share-bar-fill { height: 100%; background: var(--primary-color); }

.empty-note { color: #059669; }

.charts { display: grid; gap: 1.5rem; }
.chart { border: 1px solid var(--border-color); border-radius: 8px; padding: 0.5rem; }
.chart svg { width: 100%; height: auto; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.75rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .chart { page-break-inside: avoid; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{empty_report, test_report};

    #[test]
    fn test_html_render_structure() {
        let html = render(&test_report()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Place frequency report</title>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_html_has_statistics_and_outliers() {
        let html = render(&test_report()).unwrap();
        assert!(html.contains("Most frequent"));
        assert!(html.contains("9.10"));
        assert!(html.contains("11.50"));
        assert!(html.contains("<tr class=\"outlier\"><td>20</td><td>Zoo</td><td>1</td></tr>"));
    }

    #[test]
    fn test_html_inlines_all_charts() {
        let html = render(&test_report()).unwrap();
        assert_eq!(html.matches("<figure class=\"chart\"").count(), 5);
        assert!(html.contains("<svg"));
        assert!(html.contains("id=\"box_plot\""));
    }

    #[test]
    fn test_html_empty_report_has_no_charts() {
        let html = render(&empty_report()).unwrap();
        assert!(html.contains("No outliers found."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}

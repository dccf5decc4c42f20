//! Analyze command - read the label column, summarize, render

use crate::charts;
use crate::config::{ProjectConfig, SourceKind};
use crate::reporters::{self, OutputFormat};
use crate::source;
use crate::stats::generate_report;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Flags that override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Local CSV file or workbook (.xlsx, .xls, .ods) (default: places.csv)
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Download the CSV from this URL instead of reading a local file
    #[arg(long)]
    pub url: Option<String>,

    /// Column holding the labels (default: Place)
    #[arg(long)]
    pub column: Option<String>,

    /// Output format: text, json, html, markdown (or md)
    #[arg(long, short = 'f', value_parser = ["text", "txt", "json", "html", "markdown", "md"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write one SVG file per chart into this directory
    #[arg(long)]
    pub charts_dir: Option<PathBuf>,

    /// CSV field delimiter (single ASCII character)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Workbook sheet to read (default: the first one)
    #[arg(long)]
    pub sheet: Option<String>,
}

impl AnalyzeOptions {
    /// Command-line flags take precedence over file values
    pub fn apply(self, config: &mut ProjectConfig) {
        if let Some(file) = self.file {
            config.source.kind = SourceKind::Local;
            config.source.path = file;
        }
        if let Some(url) = self.url {
            config.source.kind = SourceKind::Remote;
            config.source.url = Some(url);
        }
        if self.sheet.is_some() {
            config.source.sheet = self.sheet;
        }
        if let Some(delimiter) = self.delimiter {
            config.source.delimiter = delimiter;
        }
        if let Some(column) = self.column {
            config.report.column = column;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if self.output.is_some() {
            config.report.output = self.output;
        }
        if self.charts_dir.is_some() {
            config.report.charts_dir = self.charts_dir;
        }
    }
}

/// Output path with the format's extension appended when it has none
fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(reporters::file_extension(format))
    }
}

/// Run the analyze command against an effective configuration
pub fn run(config: &ProjectConfig) -> Result<()> {
    let format = OutputFormat::from_str(&config.report.format)?;
    let source = source::from_config(&config.source)?;

    let report = generate_report(source.as_ref(), &config.report.column)?;
    info!(
        "{} rows, {} distinct labels, {} outliers",
        report.total,
        report.frequency_table.len(),
        report.outliers.len()
    );

    // Render everything in memory before touching the filesystem
    let output = reporters::report_with_format(&report, format)?;
    let rendered = match &config.report.charts_dir {
        Some(_) => charts::render_all(&report).context("Failed to render charts")?,
        None => Vec::new(),
    };
    let report_path = config
        .report
        .output
        .as_deref()
        .map(|p| output_path(p, format));

    if let Some(path) = &report_path {
        std::fs::write(path, &output)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if let Some(dir) = &config.report.charts_dir {
        let written = match charts::write_all(&rendered, dir) {
            Ok(written) => written,
            Err(e) => {
                // Charts failed after the report landed: take the report back out
                if let Some(path) = &report_path {
                    let _ = std::fs::remove_file(path);
                }
                return Err(e)
                    .with_context(|| format!("Failed to write charts to {}", dir.display()));
            }
        };
        if written.is_empty() {
            eprintln!("{} No rows, no charts written", style("!").yellow());
        } else {
            eprintln!(
                "{} Wrote {} charts to {}",
                style("✓").green(),
                written.len(),
                style(dir.display()).cyan()
            );
        }
    }

    match &report_path {
        Some(path) => eprintln!(
            "{} {} report written to {}",
            style("✓").green(),
            format,
            style(path.display()).cyan()
        ),
        None => print!("{}", output),
    }

    Ok(())
}

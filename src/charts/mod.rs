//! SVG charts for a frequency report
//!
//! Every chart is rendered into an in-memory SVG string with [`plotters`], so
//! the HTML reporter can inline them and the CLI can write them to disk.
//! The SVG backend needs no system fonts, which keeps rendering headless.

mod draw;

use crate::models::FrequencyReport;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Pixel size of every chart
const CHART_SIZE: (u32, u32) = (960, 480);

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error("Failed to save chart: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, ChartError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Count per label, ranked, with mean and median lines
    FrequencyBars,
    /// Per-row frequency distribution with Tukey fences
    BoxPlot,
    /// Per-row frequency by row index
    Scatter,
    /// Share of each label
    Share,
    /// Count per label in alphabetical order
    FrequencyLine,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::FrequencyBars,
        ChartKind::BoxPlot,
        ChartKind::Scatter,
        ChartKind::Share,
        ChartKind::FrequencyLine,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::FrequencyBars => "frequency_bars.svg",
            ChartKind::BoxPlot => "box_plot.svg",
            ChartKind::Scatter => "scatter.svg",
            ChartKind::Share => "share_pie.svg",
            ChartKind::FrequencyLine => "frequency_line.svg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::FrequencyBars => "Frequency by label",
            ChartKind::BoxPlot => "Per-row frequency distribution",
            ChartKind::Scatter => "Per-row frequency",
            ChartKind::Share => "Label share",
            ChartKind::FrequencyLine => "Frequency by label (alphabetical)",
        }
    }
}

/// One rendered chart
#[derive(Debug, Clone)]
pub struct Chart {
    pub kind: ChartKind,
    pub svg: String,
}

fn drawing(e: impl std::fmt::Display) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Render a single chart as an SVG document
pub fn render(report: &FrequencyReport, kind: ChartKind) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        match kind {
            ChartKind::FrequencyBars => draw::frequency_bars(&root, report)?,
            ChartKind::BoxPlot => draw::box_plot(&root, report)?,
            ChartKind::Scatter => draw::scatter(&root, report)?,
            ChartKind::Share => draw::share(&root, report)?,
            ChartKind::FrequencyLine => draw::frequency_line(&root, report)?,
        }

        root.present().map_err(drawing)?;
    }
    Ok(svg)
}

/// Render every chart; an empty report has nothing to plot
pub fn render_all(report: &FrequencyReport) -> Result<Vec<Chart>> {
    if report.is_empty() {
        debug!("Empty report, skipping charts");
        return Ok(Vec::new());
    }

    ChartKind::ALL
        .iter()
        .map(|&kind| {
            Ok(Chart {
                kind,
                svg: render(report, kind)?,
            })
        })
        .collect()
}

/// Write each chart to `dir/<file name>`, creating `dir` if needed.
///
/// All or nothing: on a failed write the charts already written are removed.
pub fn write_all(charts: &[Chart], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = dir.join(chart.kind.file_name());
        if let Err(e) = std::fs::write(&path, &chart.svg) {
            for done in &written {
                let _ = std::fs::remove_file(done);
            }
            return Err(e.into());
        }
        debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

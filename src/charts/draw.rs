//! Drawing routines, one per chart kind

use super::{drawing, ChartKind, Result};
use crate::models::{display_label, FrequencyReport};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{Palette, Palette99};
use std::collections::{BTreeSet, HashSet};
use std::f64::consts::PI;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const ORANGE: RGBColor = RGBColor(255, 140, 0);

/// Label for a category axis tick; ticks between categories stay blank
fn label_at(labels: &[&str], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 0.01 || index < 0.0 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|l| l.to_string())
        .unwrap_or_default()
}

/// Top of the value axis with some headroom
fn y_ceiling(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(0.0, f64::max);
    (max * 1.15).max(1.0)
}

fn category_range(n: usize) -> std::ops::Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

pub(super) fn frequency_bars(root: &Area<'_>, report: &FrequencyReport) -> Result<()> {
    let ranked = report.frequency_table.ranked();
    let labels: Vec<&str> = ranked.iter().map(|e| display_label(&e.label)).collect();
    let stats = &report.statistics;
    let x_range = category_range(labels.len());
    let y_max = y_ceiling(
        ranked
            .iter()
            .map(|e| e.count as f64)
            .chain([stats.mean, stats.median]),
    );

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::FrequencyBars.title(), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| label_at(&labels, *x))
        .x_desc(report.column.as_str())
        .y_desc("Frequency")
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(ranked.iter().enumerate().map(|(i, entry)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.35, 0.0), (x + 0.35, entry.count as f64)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            [(x_range.start, stats.mean), (x_range.end, stats.mean)],
            RED.stroke_width(2),
        ))
        .map_err(drawing)?
        .label(format!("Mean ({:.2})", stats.mean))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(
            [(x_range.start, stats.median), (x_range.end, stats.median)],
            GREEN.stroke_width(2),
        ))
        .map_err(drawing)?
        .label(format!("Median ({:.2})", stats.median))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}

pub(super) fn box_plot(root: &Area<'_>, report: &FrequencyReport) -> Result<()> {
    let stats = &report.statistics;
    let values: Vec<f64> = report.row_frequencies.iter().map(|&f| f as f64).collect();
    let inside = |v: &&f64| **v >= stats.lower_fence && **v <= stats.upper_fence;
    let whisker_low = values.iter().filter(inside).copied().fold(stats.q1, f64::min);
    let whisker_high = values.iter().filter(inside).copied().fold(stats.q3, f64::max);
    let y_max = y_ceiling([stats.upper_fence, stats.max]);
    let labels = [report.column.as_str()];

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::BoxPlot.title(), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-1.0..1.0, 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x| label_at(&labels, *x))
        .y_desc("Per-row frequency")
        .draw()
        .map_err(drawing)?;

    // Box from Q1 to Q3 with the median across it
    chart
        .draw_series([
            Rectangle::new([(-0.3, stats.q1), (0.3, stats.q3)], BLUE.mix(0.3).filled()),
            Rectangle::new([(-0.3, stats.q1), (0.3, stats.q3)], BLUE.stroke_width(2)),
        ])
        .map_err(drawing)?;
    chart
        .draw_series([
            PathElement::new(vec![(-0.3, stats.median), (0.3, stats.median)], BLACK.stroke_width(3)),
            PathElement::new(vec![(0.0, stats.q3), (0.0, whisker_high)], BLACK),
            PathElement::new(vec![(0.0, stats.q1), (0.0, whisker_low)], BLACK),
            PathElement::new(vec![(-0.15, whisker_high), (0.15, whisker_high)], BLACK),
            PathElement::new(vec![(-0.15, whisker_low), (0.15, whisker_low)], BLACK),
        ])
        .map_err(drawing)?;

    let outlier_values: BTreeSet<usize> = report.outliers.iter().map(|o| o.frequency).collect();
    chart
        .draw_series(
            outlier_values
                .into_iter()
                .map(|f| Circle::new((0.0, f as f64), 5, RED.filled())),
        )
        .map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            [(-1.0, stats.upper_fence), (1.0, stats.upper_fence)],
            ORANGE.stroke_width(2),
        ))
        .map_err(drawing)?
        .label(format!("Upper fence ({:.2})", stats.upper_fence))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE));

    chart
        .draw_series(LineSeries::new(
            [(-1.0, stats.lower_fence), (1.0, stats.lower_fence)],
            MAGENTA.stroke_width(2),
        ))
        .map_err(drawing)?
        .label(format!("Lower fence ({:.2})", stats.lower_fence))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}

pub(super) fn scatter(root: &Area<'_>, report: &FrequencyReport) -> Result<()> {
    let stats = &report.statistics;
    let outlier_rows: HashSet<usize> = report.outliers.iter().map(|o| o.row).collect();
    let x_range = category_range(report.total);
    let y_max = y_ceiling([stats.max, stats.upper_fence]);

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::Scatter.title(), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc("Row")
        .y_desc("Frequency")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(report.row_frequencies.iter().enumerate().map(|(row, &f)| {
            let color = if outlier_rows.contains(&row) { RED } else { PURPLE };
            Circle::new((row as f64, f as f64), 3, color.mix(0.6).filled())
        }))
        .map_err(drawing)?;

    for (fence, color) in [(stats.lower_fence, MAGENTA), (stats.upper_fence, ORANGE)] {
        chart
            .draw_series(LineSeries::new(
                [(x_range.start, fence), (x_range.end, fence)],
                color.mix(0.7),
            ))
            .map_err(drawing)?;
    }

    Ok(())
}

/// Pie wedges are drawn by hand as polygons on the pixel grid
pub(super) fn share(root: &Area<'_>, report: &FrequencyReport) -> Result<()> {
    let root = root
        .titled(ChartKind::Share.title(), CAPTION_FONT)
        .map_err(drawing)?;
    let (pie_area, legend_area) = root.split_horizontally(560);

    let (width, height) = pie_area.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = (width.min(height) as f64 / 2.0) - 20.0;

    let ranked = report.frequency_table.ranked();
    let total = report.total.max(1) as f64;

    // Start at twelve o'clock, go clockwise
    let mut start = -PI / 2.0;
    for (i, entry) in ranked.iter().enumerate() {
        let sweep = entry.count as f64 / total * 2.0 * PI;
        let steps = ((sweep / (PI / 90.0)).ceil() as usize).max(1);
        let mut points = vec![(center.0 as i32, center.1 as i32)];
        points.extend((0..=steps).map(|s| {
            let angle = start + sweep * s as f64 / steps as f64;
            (
                (center.0 + radius * angle.cos()).round() as i32,
                (center.1 + radius * angle.sin()).round() as i32,
            )
        }));
        pie_area
            .draw(&Polygon::new(points, Palette99::pick(i).filled()))
            .map_err(drawing)?;
        start += sweep;
    }

    let row_height = 22;
    let max_rows = (legend_area.dim_in_pixel().1 as usize / row_height as usize).saturating_sub(1);
    for (i, entry) in ranked.iter().take(max_rows).enumerate() {
        let y = 10 + i as i32 * row_height;
        legend_area
            .draw(&Rectangle::new([(0, y), (14, y + 14)], Palette99::pick(i).filled()))
            .map_err(drawing)?;
        let text = format!(
            "{}: {} ({:.1}%)",
            display_label(&entry.label),
            entry.count,
            entry.count as f64 / total * 100.0
        );
        legend_area
            .draw(&Text::new(text, (22, y), ("sans-serif", 14).into_font()))
            .map_err(drawing)?;
    }
    if ranked.len() > max_rows {
        let y = 10 + max_rows as i32 * row_height;
        legend_area
            .draw(&Text::new(
                format!("... and {} more", ranked.len() - max_rows),
                (22, y),
                ("sans-serif", 14).into_font(),
            ))
            .map_err(drawing)?;
    }

    Ok(())
}

pub(super) fn frequency_line(root: &Area<'_>, report: &FrequencyReport) -> Result<()> {
    let sorted = report.frequency_table.sorted_by_label();
    let labels: Vec<&str> = sorted.iter().map(|e| display_label(&e.label)).collect();
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .enumerate()
        .map(|(i, e)| (i as f64, e.count as f64))
        .collect();
    let y_max = y_ceiling(points.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::FrequencyLine.title(), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(category_range(labels.len()), 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| label_at(&labels, *x))
        .x_desc(report.column.as_str())
        .y_desc("Frequency")
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))
        .map_err(drawing)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .map_err(drawing)?;

    Ok(())
}

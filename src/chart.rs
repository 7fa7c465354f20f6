// ABOUTME: Glucose chart rendering for the graph command
// ABOUTME: Draws mmol/L values as colored dots on a dark background with target gridlines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! Chart rendering.
//!
//! Presentation-only: this is the one place glucose values are converted to
//! mmol/L. Dots are colored by where the value sits relative to the target
//! band, dot size shrinks as the sample count grows, and the most recent
//! reading is annotated with its trend arrow.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use plotters::prelude::*;

use nsexport_core::models::GlucoseEntry;

const WIDTH: u32 = 2048;
const HEIGHT: u32 = 800;

/// Fixed y-axis bounds in mmol/L
const Y_MIN: f64 = 0.0;
const Y_MAX: f64 = 26.0;

/// Hypoglycemia alarm gridline, mmol/L
const ALARM_LOW: f64 = 3.2;

/// Hyperglycemia alarm gridline, mmol/L
const ALARM_HIGH: f64 = 14.5;

const RED: RGBColor = RGBColor(217, 0, 0);

/// Render a PNG chart of the given entries.
///
/// # Errors
///
/// Returns an error when the output file cannot be written or the entries
/// span no usable time range.
pub fn draw_chart(
    entries: &[GlucoseEntry],
    path: &Path,
    target_low: f64,
    target_high: f64,
) -> Result<()> {
    let mut points: Vec<(DateTime<Local>, f64)> = entries
        .iter()
        .map(|e| (e.date_string.with_timezone(&Local), e.sgv.as_mmol()))
        .collect();
    points.sort_by_key(|(ts, _)| *ts);

    let (first_ts, last_ts) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => anyhow::bail!("no entries to draw"),
    };

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&BLACK).context("fill chart background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Nightscout", ("sans-serif", 40).into_font().color(&WHITE))
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(first_ts..last_ts, Y_MIN..Y_MAX)
        .context("build chart axes")?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(&WHITE)
        .label_style(("sans-serif", 18).into_font().color(&WHITE))
        .x_label_formatter(&|ts| ts.format("%m/%d %H:%M").to_string())
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .context("draw chart mesh")?;

    for gridline in [ALARM_LOW, target_low, target_high, ALARM_HIGH] {
        chart
            .draw_series(LineSeries::new(
                [(first_ts, gridline), (last_ts, gridline)],
                ShapeStyle::from(&RGBColor(100, 100, 100)).stroke_width(1),
            ))
            .context("draw gridline")?;
    }

    let dot_size = dot_size_from_count(points.len());
    chart
        .draw_series(points.iter().map(|&(ts, value)| {
            Circle::new(
                (ts, value),
                dot_size,
                colorize(value, target_low, target_high).filled(),
            )
        }))
        .context("draw glucose series")?;

    if let Some(last) = entries.iter().max_by_key(|e| e.date_string) {
        let label = format!("{:.1} {}", last.sgv.as_mmol(), trend_glyph(&last.direction));
        let color = colorize(last.sgv.as_mmol(), target_low, target_high);
        root.draw(&Text::new(
            label,
            (i32::try_from(WIDTH).unwrap_or(i32::MAX) - 300, 40),
            ("sans-serif", 40).into_font().color(&color),
        ))
        .context("draw last glucose annotation")?;
        root.draw(&Text::new(
            last.date_string
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
            (40, 40),
            ("sans-serif", 40).into_font().color(&RGBColor(180, 180, 180)),
        ))
        .context("draw last sample time")?;
    }

    root.present().context("write chart file")?;

    Ok(())
}

fn dot_size_from_count(count: usize) -> u32 {
    match count {
        0..=99 => 4,
        100..=299 => 3,
        300..=599 => 2,
        _ => 1,
    }
}

fn colorize(value: f64, target_low: f64, target_high: f64) -> RGBColor {
    if value >= ALARM_HIGH || value <= target_low {
        RED
    } else if value >= target_high {
        YELLOW
    } else {
        GREEN
    }
}

fn trend_glyph(direction: &str) -> &'static str {
    match direction {
        "DoubleUp" | "TripleUp" => "↑↑",
        "SingleUp" => "↑",
        "FortyFiveUp" => "↗",
        "FortyFiveDown" => "↘",
        "SingleDown" => "↓",
        "DoubleDown" | "TripleDown" => "↓↓",
        _ => "→",
    }
}

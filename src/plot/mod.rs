//! Response-time charts
//!
//! Renders a two-panel SVG figure: a frequency histogram of latencies on
//! top and latency against request index below. Rendering is headless and
//! needs no system fonts.

use crate::{
    defaults::DEFAULT_HISTOGRAM_BINS,
    error::{AppError, Result},
    stats::Histogram,
};
use plotters::prelude::*;
use std::path::PathBuf;

const HISTOGRAM_TITLE: &str = "Distribution of Response Times";
const SCATTER_TITLE: &str = "Response Times Over Time";

/// Figure size in pixels
const DEFAULT_SIZE: (u32, u32) = (1200, 800);

/// Which chart a panel holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Histogram,
    Scatter,
}

/// What was written by a successful [`Visualizer::plot`] call
#[derive(Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub path: PathBuf,
    pub panels: Vec<PanelKind>,
    pub bins: usize,
}

/// Draws latency charts to an SVG file
#[derive(Debug, Clone)]
pub struct Visualizer {
    output: PathBuf,
    bins: usize,
    size: (u32, u32),
}

fn plot_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::plot(e.to_string())
}

impl Visualizer {
    /// Create a visualizer writing to `output` with the default layout
    pub fn new<P: Into<PathBuf>>(output: P) -> Self {
        Self {
            output: output.into(),
            bins: DEFAULT_HISTOGRAM_BINS,
            size: DEFAULT_SIZE,
        }
    }

    /// Render both panels for `latencies` (request order, milliseconds).
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is
    /// nothing to plot.
    pub fn plot(&self, latencies: &[f64]) -> Result<Option<PlotReport>> {
        let histogram = match Histogram::from_values(latencies, self.bins) {
            Some(histogram) => histogram,
            None => return Ok(None),
        };

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::io(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let root = SVGBackend::new(&self.output, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let areas = root.split_evenly((2, 1));
        let mut panels = Vec::with_capacity(areas.len());
        draw_histogram(&areas[0], &histogram)?;
        panels.push(PanelKind::Histogram);
        draw_scatter(&areas[1], latencies)?;
        panels.push(PanelKind::Scatter);

        root.present().map_err(plot_err)?;

        Ok(Some(PlotReport {
            path: self.output.clone(),
            panels,
            bins: histogram.counts.len(),
        }))
    }
}

fn draw_histogram<DB: DrawingBackend>(area: &DrawingArea<DB, plotters::coord::Shift>, histogram: &Histogram) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let y_max = (histogram.max_count() as f64 * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(HISTOGRAM_TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(histogram.lower..histogram.upper(), 0f64..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Response Time (ms)")
        .y_desc("Frequency")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(histogram.bins().filter(|(_, _, count)| *count > 0).map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], BLUE.mix(0.7).filled())
        }))
        .map_err(plot_err)?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(area: &DrawingArea<DB, plotters::coord::Shift>, latencies: &[f64]) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let max = latencies.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };
    let x_max = (latencies.len() as f64).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(SCATTER_TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Request Number")
        .y_desc("Response Time (ms)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            latencies
                .iter()
                .enumerate()
                .map(|(index, &latency)| Circle::new((index as f64, latency), 2, RED.mix(0.6).filled())),
        )
        .map_err(plot_err)?;

    Ok(())
}

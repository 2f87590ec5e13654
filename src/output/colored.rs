//! Colored formatter implementation with terminal color support
//!
//! Produces the same text as [`PlainFormatter`] with ANSI styling layered
//! on top, so stripping escape codes yields the plain output.

use crate::{
    error::Result,
    models::ProbeOutcome,
    stats::LatencySummary,
    types::ExecutionMode,
};
use super::formatter::{fmt_err, format_seconds, OutputFormatter, FormattingOptions};
use std::fmt::Write as _;
use std::time::Duration;
use colored::*;

/// Performance level classification for color coding
#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl PerformanceLevel {
    /// Determine performance level from response time in milliseconds
    pub fn from_response_time(time_ms: f64) -> Self {
        if time_ms < 50.0 {
            Self::Excellent
        } else if time_ms < 100.0 {
            Self::Good
        } else if time_ms < 300.0 {
            Self::Fair
        } else if time_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.bold().color(color)
        } else {
            text.normal()
        }
    }

    /// Latency in milliseconds, colored by performance level
    fn latency(&self, latency_ms: f64) -> ColoredString {
        let performance = PerformanceLevel::from_response_time(latency_ms);
        self.colorize(&format!("{:.2} ms", latency_ms), performance.color())
    }

    fn error_count(&self, errors: u64) -> ColoredString {
        let color = if errors == 0 { self.color_scheme.success } else { self.color_scheme.error };
        self.colorize(&errors.to_string(), color)
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, url: &str, duration: Duration, mode: ExecutionMode) -> String {
        let mut output = format!(
            "{}\nTarget URL: {}",
            self.bold(&format!("Starting load test for {} seconds...", format_seconds(duration)), self.color_scheme.header),
            self.colorize(url, self.color_scheme.info)
        );
        if let ExecutionMode::Concurrent { workers } = mode {
            output.push_str(&format!("\nConcurrent workers: {}", self.colorize(&workers.to_string(), self.color_scheme.info)));
        }
        output
    }

    fn format_progress(&self, request_number: u64, outcome: &ProbeOutcome) -> String {
        let label = self.colorize(&format!("Request {}:", request_number), self.color_scheme.muted);
        match outcome {
            ProbeOutcome::Success { latency_ms } => {
                format!("{} {}", label, self.latency(*latency_ms))
            }
            ProbeOutcome::HttpError { status, latency_ms } => {
                format!(
                    "{} {}, {}",
                    label,
                    self.colorize(&format!("status {}", status), self.color_scheme.warning),
                    self.latency(*latency_ms)
                )
            }
            ProbeOutcome::TransportError { reason } => {
                format!("{} {}", label, self.colorize(&format!("failed, {}", reason), self.color_scheme.error))
            }
        }
    }

    fn format_statistics(&self, summary: &LatencySummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", self.bold("Statistics:", self.color_scheme.header)).map_err(fmt_err)?;
        writeln!(output, "Total successful requests: {}", self.colorize(&summary.count.to_string(), self.color_scheme.info)).map_err(fmt_err)?;
        writeln!(output, "Errors: {}", self.error_count(summary.errors)).map_err(fmt_err)?;
        writeln!(output, "Average: {}", self.latency(summary.mean_ms)).map_err(fmt_err)?;
        writeln!(output, "Median: {}", self.latency(summary.median_ms)).map_err(fmt_err)?;
        writeln!(output, "95th percentile: {}", self.latency(summary.p95_ms)).map_err(fmt_err)?;
        writeln!(output, "99th percentile: {}", self.latency(summary.p99_ms)).map_err(fmt_err)?;
        write!(output, "Max: {}", self.latency(summary.max_ms)).map_err(fmt_err)?;

        if self.options.verbose_mode {
            write!(output, "\nMin: {}\nStd dev: {:.2} ms", self.latency(summary.min_ms), summary.std_dev_ms)
                .map_err(fmt_err)?;
        }

        Ok(output)
    }

    fn format_empty_result(&self, errors: u64) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", self.colorize("No successful requests recorded.", self.color_scheme.warning)).map_err(fmt_err)?;
        write!(output, "Errors: {}", self.error_count(errors)).map_err(fmt_err)?;
        Ok(output)
    }

    fn format_success(&self, message: &str) -> String {
        format!("OK: {}", self.colorize(message, self.color_scheme.success))
    }
}

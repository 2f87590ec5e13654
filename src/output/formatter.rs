//! Core formatting trait and the plain text implementation

use crate::{
    error::{AppError, Result},
    models::ProbeOutcome,
    stats::LatencySummary,
    types::ExecutionMode,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Main trait for output formatting
pub trait OutputFormatter: Send + Sync {
    /// Lines printed before the first request
    fn format_banner(&self, url: &str, duration: Duration, mode: ExecutionMode) -> String;

    /// One progress line per request attempt (1-based request number)
    fn format_progress(&self, request_number: u64, outcome: &ProbeOutcome) -> String;

    /// Statistics block for a non-empty run
    fn format_statistics(&self, summary: &LatencySummary) -> Result<String>;

    /// Block printed when no response was received
    fn format_empty_result(&self, errors: u64) -> Result<String>;

    /// Confirmation line, e.g. after the chart is written
    fn format_success(&self, message: &str) -> String;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with extra statistics
    pub verbose_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
        }
    }
}

pub(crate) fn fmt_err(e: std::fmt::Error) -> AppError {
    AppError::internal(format!("Failed to format output: {}", e))
}

/// Render a run length the way the banner prints it (`30`, `0.05`)
pub fn format_seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        let text = format!("{:.3}", duration.as_secs_f64());
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new(FormattingOptions { enable_color: false, verbose_mode: false })
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, url: &str, duration: Duration, mode: ExecutionMode) -> String {
        let mut output = format!(
            "Starting load test for {} seconds...\nTarget URL: {}",
            format_seconds(duration),
            url
        );
        if let ExecutionMode::Concurrent { workers } = mode {
            output.push_str(&format!("\nConcurrent workers: {}", workers));
        }
        output
    }

    fn format_progress(&self, request_number: u64, outcome: &ProbeOutcome) -> String {
        match outcome {
            ProbeOutcome::Success { latency_ms } => {
                format!("Request {}: {:.2} ms", request_number, latency_ms)
            }
            ProbeOutcome::HttpError { status, latency_ms } => {
                format!("Request {}: status {}, {:.2} ms", request_number, status, latency_ms)
            }
            ProbeOutcome::TransportError { reason } => {
                format!("Request {}: failed, {}", request_number, reason)
            }
        }
    }

    fn format_statistics(&self, summary: &LatencySummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Statistics:").map_err(fmt_err)?;
        writeln!(output, "Total successful requests: {}", summary.count).map_err(fmt_err)?;
        writeln!(output, "Errors: {}", summary.errors).map_err(fmt_err)?;
        writeln!(output, "Average: {:.2} ms", summary.mean_ms).map_err(fmt_err)?;
        writeln!(output, "Median: {:.2} ms", summary.median_ms).map_err(fmt_err)?;
        writeln!(output, "95th percentile: {:.2} ms", summary.p95_ms).map_err(fmt_err)?;
        writeln!(output, "99th percentile: {:.2} ms", summary.p99_ms).map_err(fmt_err)?;
        write!(output, "Max: {:.2} ms", summary.max_ms).map_err(fmt_err)?;

        if self.options.verbose_mode {
            write!(output, "\nMin: {:.2} ms\nStd dev: {:.2} ms", summary.min_ms, summary.std_dev_ms)
                .map_err(fmt_err)?;
        }

        Ok(output)
    }

    fn format_empty_result(&self, errors: u64) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "No successful requests recorded.").map_err(fmt_err)?;
        write!(output, "Errors: {}", errors).map_err(fmt_err)?;
        Ok(output)
    }

    fn format_success(&self, message: &str) -> String {
        format!("OK: {}", message)
    }
}

//! Output formatting and display system
//!
//! Formatters turn probe outcomes and latency summaries into console text.
//! The [`Reporter`] renders the end-of-run statistics block, either as text
//! or as a JSON document.

mod formatter;
mod colored;

pub use formatter::{
    OutputFormatter,
    PlainFormatter,
    FormattingOptions,
    format_seconds,
};
pub use colored::{
    ColoredFormatter,
    ColorScheme,
    PerformanceLevel,
};

use crate::{
    error::Result,
    models::RunResult,
    stats::LatencySummary,
};
use serde::Serialize;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        Self::from_options(FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        })
    }

    /// Colored formatter when `options` enable color, plain otherwise
    pub fn from_options(options: FormattingOptions) -> Box<dyn OutputFormatter> {
        if options.enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false, false)
    }
}

/// Machine-readable run report
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// `None` when no response was received
    summary: Option<LatencySummary>,
    errors: u64,
    /// Errors that produced no response at all
    transport_failures: u64,
    attempts: u64,
    elapsed_ms: f64,
    requests_per_second: f64,
    started_at: &'a chrono::DateTime<chrono::Utc>,
}

/// Prints the end-of-run statistics
pub struct Reporter {
    formatter: Box<dyn OutputFormatter>,
    json: bool,
}

impl Reporter {
    /// Create a text reporter using the given formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter, json: false }
    }

    /// Create a reporter that emits JSON instead of text
    pub fn json() -> Self {
        Self {
            formatter: OutputFormatterFactory::create_plain_formatter(),
            json: true,
        }
    }

    /// Render the report without printing it.
    ///
    /// Rendering reads the result only, so repeated calls give identical text.
    pub fn render(&self, result: &RunResult) -> Result<String> {
        let summary = LatencySummary::from_samples(&result.latencies, result.errors);

        if self.json {
            let report = JsonReport {
                summary,
                errors: result.errors,
                transport_failures: result.transport_failures(),
                attempts: result.attempts,
                elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
                requests_per_second: result.requests_per_second(),
                started_at: &result.started_at,
            };
            return Ok(serde_json::to_string_pretty(&report)?);
        }

        match summary {
            Some(summary) => Ok(format!("\n{}", self.formatter.format_statistics(&summary)?)),
            None => self.formatter.format_empty_result(result.errors),
        }
    }

    /// Render and print the report to stdout
    pub fn report(&self, result: &RunResult) -> Result<()> {
        let output = self.render(result)?;
        println!("{}", output);
        Ok(())
    }

    /// Formatter used for text output
    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }
}

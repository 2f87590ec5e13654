//! Structured logging for the load probe
//!
//! Entries carry a level, a message and a set of structured fields, and are
//! written to stderr either as a console line or as one JSON object. stdout
//! stays reserved for progress lines and the statistics report.
//!
//! [`LoggerFactory`] stamps every logger it hands out with the same session
//! ID so the entries of one run can be tied together.

use crate::error::AppError;
use crate::models::{Config, ProbeOutcome, RunResult};
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Per-request detail
    Debug = 0,
    /// Run lifecycle and failed requests
    Info = 1,
    /// Potentially harmful situations
    Warn = 2,
    /// The run was aborted
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn color(&self) -> Color {
        match self {
            LogLevel::Debug => Color::Cyan,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }
}

/// One structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    pub session_id: Option<String>,
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console line
    Console,
    /// One JSON object per line
    Json,
}

/// Leveled logger writing to stderr
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    session_id: Option<String>,
}

impl Logger {
    /// Console logger at info level
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            format: LogFormat::Console,
            name,
            session_id: None,
        }
    }

    /// Logger whose level and format follow `--verbose` / `--debug`.
    ///
    /// Debug mode switches to JSON lines so a run can be post-processed.
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            ..Self::new(name)
        }
    }

    /// Tag every entry with a session ID
    pub fn with_session_id(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Start an entry at the given level
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn write_entry(&self, entry: LogEntry) {
        if let Some(output) = self.render_entry(entry) {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }

    /// Format an entry; `None` when it is below the minimum level
    fn render_entry(&self, mut entry: LogEntry) -> Option<String> {
        if !self.would_log(entry.level) {
            return None;
        }

        entry.session_id = self.session_id.clone();

        Some(match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => serde_json::to_string(&entry).unwrap_or_else(|_| {
                format!("{{\"level\":\"{}\",\"message\":{:?}}}", entry.level.as_str(), entry.message)
            }),
        })
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let level = format!("{:>5}", entry.level.as_str());
        let level = if self.use_color {
            level.color(entry.level.color()).to_string()
        } else {
            level
        };

        let mut output = format!(
            "{} {} [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            entry.logger,
            entry.message
        );

        if let Some(session_id) = &entry.session_id {
            output.push_str(&format!(" [{}]", session_id.get(..8).unwrap_or(session_id)));
        }

        if !entry.fields.is_empty() {
            let fields: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }
}

/// Builder for one log entry
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                session_id: None,
                fields: BTreeMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add outcome fields for one request attempt
    pub fn outcome(self, outcome: &ProbeOutcome) -> Self {
        self.field("status", outcome.status().as_str())
            .field("http_status", outcome.http_status())
            .field("latency_ms", outcome.latency_ms())
    }

    /// Add error classification fields
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
            .field("error_exit_code", error.exit_code())
    }

    /// Write the entry to stderr
    pub fn log(self) {
        self.logger.write_entry(self.entry);
    }

    /// Return the formatted line instead of writing it
    pub fn render(self) -> Option<String> {
        self.logger.render_entry(self.entry)
    }
}

/// Logger for request attempts and run lifecycle
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn log_run_start(&self, url: &str, duration_secs: f64, workers: usize) {
        self.logger.info(&format!("Probing {} for {:.1}s", url, duration_secs))
            .field("url", url)
            .field("duration_secs", duration_secs)
            .field("workers", workers)
            .log();
    }

    /// Successful requests log at debug, everything else at info
    pub fn log_request(&self, url: &str, request_number: u64, outcome: &ProbeOutcome) {
        let (level, message) = match outcome {
            ProbeOutcome::Success { latency_ms } => (
                LogLevel::Debug,
                format!("GET {} -> 200 in {:.1}ms", url, latency_ms),
            ),
            ProbeOutcome::HttpError { status, latency_ms } => (
                LogLevel::Info,
                format!("GET {} -> {} in {:.1}ms", url, status, latency_ms),
            ),
            ProbeOutcome::TransportError { reason } => (
                LogLevel::Info,
                format!("GET {} failed: {}", url, reason),
            ),
        };

        self.logger.log(level, &message)
            .field("url", url)
            .field("request", request_number)
            .outcome(outcome)
            .log();
    }

    pub fn log_transport_error(&self, url: &str, request_number: u64, error: &AppError) {
        self.logger.debug(&format!("Transport failure on request {}", request_number))
            .field("url", url)
            .field("request", request_number)
            .error_info(error)
            .log();
    }

    pub fn log_run_complete(&self, result: &RunResult) {
        self.logger.info(&format!(
            "Run finished: {} attempts, {} responses, {} errors",
            result.attempts,
            result.latencies.len(),
            result.errors
        ))
            .field("attempts", result.attempts)
            .field("responses", result.latencies.len())
            .field("errors", result.errors)
            .field("elapsed_ms", result.elapsed.as_secs_f64() * 1000.0)
            .log();
    }

    /// A non-recoverable error stopped the run
    pub fn log_run_aborted(&self, url: &str, error: &AppError) {
        self.logger.error(&format!("Run against {} aborted: {}", url, error))
            .field("url", url)
            .error_info(error)
            .log();
    }
}

/// Hands out loggers sharing one session ID
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Probe logger tagged with this session
    pub fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::from_logger(
            Logger::with_config("PROBE".to_string(), &self.config).with_session_id(self.session_id.clone()),
        )
    }
}

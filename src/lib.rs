//! HTTP Load Probe
//!
//! Issues HTTP GET requests against a single target URL for a fixed
//! wall-clock duration, records per-request latency, then reports
//! descriptive statistics and renders response-time plots.

pub mod app;
pub mod cli;
pub mod config;
pub mod client;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod plot;
pub mod prober;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::{App, RunSummary};
pub use error::{AppError, Result};
pub use models::{Config, ProbeOutcome, RunResult};
pub use prober::{ProbeConfig, Prober};
pub use stats::{LatencySummary, Histogram};
pub use output::{OutputFormatter, ColoredFormatter, PlainFormatter, OutputFormatterFactory, Reporter};
pub use plot::{Visualizer, PlotReport};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TARGET_URL: &str = "http://127.0.0.1:8080/albums";
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_CONCURRENCY: usize = 1;
    pub const DEFAULT_PLOT_OUTPUT: &str = "response_times.svg";
    pub const DEFAULT_HISTOGRAM_BINS: usize = 50;
    pub const DEFAULT_ENABLE_PLOT: bool = true;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_DURATION_SECS: u64 = 86_400;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
    pub const MAX_CONCURRENCY: usize = 256;
}

//! Configuration data model and validation

use crate::types::{AppError, ExecutionMode, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Target URL to probe
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Wall-clock length of the run in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_seconds: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Number of requests in flight at once (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Where the response-time chart is written
    #[serde(default = "default_plot_output")]
    pub plot_output: String,

    /// Render the chart after the report
    #[serde(default = "default_enable_plot")]
    pub enable_plot: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Print the summary as JSON instead of text
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            duration_seconds: default_duration_secs(),
            timeout_seconds: default_timeout_secs(),
            concurrency: default_concurrency(),
            plot_output: default_plot_output(),
            enable_plot: default_enable_plot(),
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get run length as Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Scheduling mode implied by the concurrency setting
    pub fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::from_concurrency(self.concurrency)
    }

    /// Chart output path
    pub fn plot_path(&self) -> PathBuf {
        PathBuf::from(&self.plot_output)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.target_url.is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        match url::Url::parse(&self.target_url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::config(format!(
                        "Target URL must use http or https: {}",
                        self.target_url
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(AppError::config(format!("Target URL has no host: {}", self.target_url)));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!("Invalid target URL '{}': {}", self.target_url, e)));
            }
        }

        // A zero-second run is valid and performs no requests
        if self.duration_seconds > crate::defaults::MAX_DURATION_SECS {
            return Err(AppError::config(format!(
                "Duration cannot exceed {} seconds",
                crate::defaults::MAX_DURATION_SECS
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECS
            )));
        }

        if self.concurrency == 0 {
            return Err(AppError::config("Concurrency must be at least 1"));
        }

        if self.concurrency > crate::defaults::MAX_CONCURRENCY {
            return Err(AppError::config(format!(
                "Concurrency cannot exceed {}",
                crate::defaults::MAX_CONCURRENCY
            )));
        }

        if self.enable_plot && self.plot_output.trim().is_empty() {
            return Err(AppError::config("Plot output path cannot be empty when plotting is enabled"));
        }

        Ok(())
    }

    /// Merge settings from an arbitrary key lookup (process env in production)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TARGET_URL") {
            let url = url.trim();
            if !url.is_empty() {
                self.target_url = url.to_string();
            }
        }

        if let Some(duration) = lookup("DURATION_SECONDS") {
            self.duration_seconds = duration.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DURATION_SECONDS value '{}': {}", duration, e)))?;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Some(concurrency) = lookup("CONCURRENCY") {
            self.concurrency = concurrency.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid CONCURRENCY value '{}': {}", concurrency, e)))?;
        }

        if let Some(plot_output) = lookup("PLOT_OUTPUT") {
            self.plot_output = plot_output.trim().to_string();
        }

        if let Some(enable_plot) = lookup("ENABLE_PLOT") {
            self.enable_plot = enable_plot.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_PLOT value '{}': {}", enable_plot, e)))?;
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_target_url() -> String {
    crate::defaults::DEFAULT_TARGET_URL.to_string()
}

fn default_duration_secs() -> u64 {
    crate::defaults::DEFAULT_DURATION.as_secs()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_concurrency() -> usize {
    crate::defaults::DEFAULT_CONCURRENCY
}

fn default_plot_output() -> String {
    crate::defaults::DEFAULT_PLOT_OUTPUT.to_string()
}

fn default_enable_plot() -> bool {
    crate::defaults::DEFAULT_ENABLE_PLOT
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

//! Command-line interface definition

use clap::Parser;
use std::path::PathBuf;

/// HTTP Load Probe - measure response times of one endpoint over a fixed duration
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "load-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target URL to probe
    #[arg(long)]
    pub url: Option<String>,

    /// How long to keep sending requests, in seconds (0 sends nothing)
    #[arg(short, long, value_parser = parse_duration)]
    pub duration: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Number of concurrent request loops (1 = strictly sequential)
    #[arg(short, long, value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Where to write the response-time chart (SVG)
    #[arg(long, value_name = "PATH")]
    pub plot_output: Option<String>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_plot: bool,

    /// Print the statistics as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// List the supported environment variables and exit
    #[arg(long)]
    pub env_help: bool,

    /// Write an example .env file and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".env.example")]
    pub init_env: Option<PathBuf>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(ref url) = self.url {
            if url.trim().is_empty() {
                return Err("--url cannot be empty".to_string());
            }
        }

        if !self.no_plot {
            if let Some(ref path) = self.plot_output {
                if path.trim().is_empty() {
                    return Err("--plot-output cannot be empty".to_string());
                }
            }
        }

        Ok(())
    }

    /// Explicit color choice from the command line, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        self.color_override().unwrap_or_else(supports_color)
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command-line overrides:\n");
        if let Some(ref url) = self.url {
            summary.push_str(&format!("  URL: {}\n", url));
        }
        if let Some(duration) = self.duration {
            summary.push_str(&format!("  Duration: {}s\n", duration));
        }
        if let Some(timeout) = self.timeout {
            summary.push_str(&format!("  Timeout: {}s\n", timeout));
        }
        if let Some(concurrency) = self.concurrency {
            summary.push_str(&format!("  Concurrency: {}\n", concurrency));
        }
        if let Some(ref path) = self.plot_output {
            summary.push_str(&format!("  Plot output: {}\n", path));
        }
        summary.push_str(&format!("  Plotting: {}\n", !self.no_plot));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

fn parse_seconds(s: &str, what: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid {}: {}", what, s));
    }

    s.parse::<u64>().map_err(|_| format!("Invalid {}: {}", what, s))
}

/// Parse run duration in seconds; zero is allowed
fn parse_duration(s: &str) -> Result<u64, String> {
    parse_seconds(s, "duration").and_then(|secs| {
        if secs > crate::defaults::MAX_DURATION_SECS {
            Err(format!("Duration cannot exceed {} seconds", crate::defaults::MAX_DURATION_SECS))
        } else {
            Ok(secs)
        }
    })
}

/// Parse request timeout in seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    parse_seconds(s, "timeout").and_then(|secs| {
        if secs == 0 {
            Err("Timeout must be greater than 0".to_string())
        } else if secs > crate::defaults::MAX_TIMEOUT_SECS {
            Err(format!("Timeout cannot exceed {} seconds", crate::defaults::MAX_TIMEOUT_SECS))
        } else {
            Ok(secs)
        }
    })
}

fn parse_concurrency(s: &str) -> Result<usize, String> {
    let workers: usize = s.parse().map_err(|_| format!("Invalid concurrency: {}", s))?;
    if workers == 0 || workers > crate::defaults::MAX_CONCURRENCY {
        return Err(format!("Concurrency must be between 1 and {}", crate::defaults::MAX_CONCURRENCY));
    }
    Ok(workers)
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

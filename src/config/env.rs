//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the working directory, warning about malformed entries first
    pub fn load_env_file(debug: bool) -> Result<()> {
        let path = Path::new(".env");
        if let Some(warnings) = Self::check_env_file(path)? {
            for warning in warnings {
                eprintln!("Warning in .env: {}", warning);
            }
        }

        Self::load_env_file_from(path, debug)
    }

    /// Load a specific env file if it exists; variables already set win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# HTTP Load Probe Configuration
#
# Values here act as defaults and can be overridden by command-line
# arguments.

# Endpoint to probe
# TARGET_URL=http://127.0.0.1:8080/albums

# How long to keep sending requests, in seconds (0-86400)
# DURATION_SECONDS=30

# Per-request timeout in seconds (1-300)
# TIMEOUT_SECONDS=10

# Concurrent request loops (1 = sequential)
# CONCURRENCY=1

# Chart output file
# PLOT_OUTPUT=response_times.svg

# Render the chart after the run (true/false)
# ENABLE_PLOT=true

# Enable colored output (true/false)
# ENABLE_COLOR=true
"#.to_string()
    }

    /// Write the example .env file; an existing file is never overwritten
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(AppError::config(format!("{} already exists", path.display())));
        }

        let content = Self::create_example_env_content();
        std::fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "TARGET_URL" => {
                url::Url::parse(value.trim())
                    .map_err(|e| AppError::config(format!("Invalid TARGET_URL '{}': {}", value, e)))?;
            }
            "DURATION_SECONDS" => {
                let secs: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid DURATION_SECONDS value '{}': {}", value, e)))?;
                if secs > crate::defaults::MAX_DURATION_SECS {
                    return Err(AppError::config(format!(
                        "DURATION_SECONDS must be at most {}, got: {}",
                        crate::defaults::MAX_DURATION_SECS, secs
                    )));
                }
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > crate::defaults::MAX_TIMEOUT_SECS {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 1 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_SECS, timeout
                    )));
                }
            }
            "CONCURRENCY" => {
                let workers: usize = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid CONCURRENCY value '{}': {}", value, e)))?;
                if workers == 0 || workers > crate::defaults::MAX_CONCURRENCY {
                    return Err(AppError::config(format!(
                        "CONCURRENCY must be between 1 and {}, got: {}",
                        crate::defaults::MAX_CONCURRENCY, workers
                    )));
                }
            }
            "PLOT_OUTPUT" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("PLOT_OUTPUT cannot be empty"));
                }
            }
            "ENABLE_PLOT" | "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("TARGET_URL", "Endpoint to probe", "http://127.0.0.1:8080/albums"),
            ("DURATION_SECONDS", "Run length in seconds (0-86400)", "30"),
            ("TIMEOUT_SECONDS", "Request timeout in seconds (1-300)", "10"),
            ("CONCURRENCY", "Concurrent request loops (1-256)", "1"),
            ("PLOT_OUTPUT", "Chart output path", "response_times.svg"),
            ("ENABLE_PLOT", "Render the chart after the run", "true"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<18} {}\n", var, description));
            help.push_str(&format!("  {:<18} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate the lines of an env file, returning one warning per bad entry
    pub fn check_env_content(content: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = Self::validate_env_var(key.trim(), value.trim()) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        warnings
    }

    /// Validate the entries of an env file; `None` when it does not exist
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(Some(Self::check_env_content(&content)))
    }
}

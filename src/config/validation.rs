//! Advisory checks on an already valid configuration
//!
//! `Config::validate` rejects configurations that cannot run. The checks
//! here only produce warnings for settings that run but probably do not do
//! what the user wants.

use crate::{
    models::Config,
    error::Result,
};
use std::path::Path;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and collect warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_target_url(&config.target_url));
        warnings.extend(Self::validate_run_settings(config));
        warnings.extend(Self::validate_plot_settings(config));

        Ok(warnings)
    }

    /// Check the target for settings that skew measurements
    fn validate_target_url(target_url: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if let Ok(parsed) = url::Url::parse(target_url) {
            if !parsed.username().is_empty() || parsed.password().is_some() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("URL '{}' embeds credentials; they will be sent with every request", target_url),
                ));
            }
            if parsed.fragment().is_some() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("URL fragment in '{}' is never sent to the server", target_url),
                ));
            }
        }

        warnings
    }

    /// Check duration, timeout and concurrency against each other
    fn validate_run_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.duration_seconds == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Duration is 0 seconds; no requests will be sent".to_string(),
            ));
        } else if config.timeout_seconds > config.duration_seconds {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Timeout of {}s exceeds the {}s run; a hung request can extend the run past its duration",
                    config.timeout_seconds, config.duration_seconds
                ),
            ));
        }

        if config.duration_seconds > 3_600 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Long run of {}s keeps every sample in memory", config.duration_seconds),
            ));
        }

        if config.concurrency > 64 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("{} concurrent workers may saturate the client before the server", config.concurrency),
            ));
        }

        warnings
    }

    /// Check the chart output path
    fn validate_plot_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if !config.enable_plot {
            return warnings;
        }

        let path = Path::new(&config.plot_output);
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        if !is_svg {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Plot output '{}' will contain SVG regardless of its extension", config.plot_output),
            ));
        }

        if path.exists() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Plot output '{}' already exists and will be overwritten", config.plot_output),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        use colored::Colorize;

        let tag = format!("[{}]", self.level.as_str());
        let tag = if use_color {
            match self.level {
                ValidationLevel::Info => tag.blue().to_string(),
                ValidationLevel::Warning => tag.yellow().to_string(),
            }
        } else {
            tag
        };
        format!("{} {}", tag, self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

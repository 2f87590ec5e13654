//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Load from environment file if it exists
        self.load_env_file()?;

        self.parse_with(|key| std::env::var(key).ok())
    }

    /// Build the configuration from defaults, `lookup` and the CLI, then validate
    pub fn parse_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref url) = self.cli.url {
            config.target_url = url.trim().to_string();
        }

        if let Some(duration) = self.cli.duration {
            config.duration_seconds = duration;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(concurrency) = self.cli.concurrency {
            config.concurrency = concurrency;
        }

        if let Some(ref path) = self.cli.plot_output {
            config.plot_output = path.clone();
        }

        if self.cli.no_plot {
            config.enable_plot = false;
        }

        if let Some(enable_color) = self.cli.color_override() {
            config.enable_color = enable_color;
        }

        // CLI-only switches
        config.json_output = self.cli.json;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Target URL: {}", config.target_url));
    summary.push(format!("Duration: {}s", config.duration_seconds));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Concurrency: {}", config.concurrency));
    if config.enable_plot {
        summary.push(format!("Plot Output: {}", config.plot_output));
    } else {
        summary.push("Plot Output: disabled".to_string());
    }
    summary.push(format!("JSON Output: {}", config.json_output));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

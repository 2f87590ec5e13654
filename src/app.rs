//! Main application orchestration and execution
//!
//! Wires the pipeline together: probe the target, print the report, then
//! render the chart.

use crate::{
    client::NetworkClient,
    config::{display_config_summary, validate_config},
    error::Result,
    logging::LoggerFactory,
    models::{Config, RunResult},
    output::{FormattingOptions, OutputFormatterFactory, Reporter},
    plot::{PlotReport, Visualizer},
    prober::{ProbeConfig, Prober},
};

/// What one application run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub result: RunResult,
    pub plot: Option<PlotReport>,
}

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance from a loaded configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the probe, print the report and render the chart
    pub async fn run(&self) -> Result<RunSummary> {
        let config = &self.config;
        let options = FormattingOptions {
            enable_color: config.enable_color,
            verbose_mode: config.verbose,
        };

        let warnings = validate_config(config)?;
        if config.debug {
            eprintln!("Configuration Summary:");
            eprintln!("{}", display_config_summary(config));
            eprintln!();
        }
        for warning in &warnings {
            eprintln!("{}", warning.format(config.enable_color));
        }

        let probe_logger = LoggerFactory::new(config.clone()).create_probe_logger();

        let client = NetworkClient::new(config.timeout())?;
        let prober = Prober::new(client, ProbeConfig::from_config(config))
            .with_formatter(OutputFormatterFactory::from_options(options.clone()))
            .with_progress(!config.json_output)
            .with_logger(probe_logger);

        let result = prober.run().await?;

        let reporter = if config.json_output {
            Reporter::json()
        } else {
            Reporter::new(OutputFormatterFactory::from_options(options))
        };
        reporter.report(&result)?;

        let plot = if config.enable_plot {
            let report = Visualizer::new(config.plot_path()).plot(&result.latencies)?;
            if let Some(ref report) = report {
                let message = format!("Response time chart saved to {}", report.path.display());
                if config.json_output {
                    eprintln!("{}", message);
                } else {
                    println!("{}", reporter.formatter().format_success(&message));
                }
            }
            report
        } else {
            None
        };

        Ok(RunSummary { result, plot })
    }
}

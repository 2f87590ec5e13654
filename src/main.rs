//! HTTP Load Probe - Main CLI Application
//!
//! Sends GET requests to one URL for a fixed duration, then prints latency
//! statistics and writes a response-time chart.

use clap::Parser;
use http_load_probe::{
    cli::Cli,
    config::{load_config, EnvManager},
    error::{ErrorReporter, Result},
    App, VERSION, PKG_NAME,
};
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if cli.env_help {
        println!("{}", EnvManager::display_env_help());
        return;
    }

    if let Some(ref path) = cli.init_env {
        match EnvManager::save_example_env_file(path) {
            Ok(()) => println!("Example configuration written to {}", path.display()),
            Err(e) => {
                reporter.report_error(&e);
                process::exit(e.exit_code());
            }
        }
        return;
    }

    if let Err(e) = run_application(cli).await {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!(
            "Built {} for {} (commit {})",
            env!("BUILD_TIME"),
            env!("TARGET_TRIPLE"),
            option_env!("GIT_COMMIT").unwrap_or("unknown")
        );
        eprintln!();
        eprintln!("{}", cli.get_config_summary());
    }

    let config = load_config(cli)?;
    let app = App::new(config)?;
    app.run().await?;

    Ok(())
}

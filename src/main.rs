/// Main entry point for the market dates tool
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use market_dates::{
    cli::Cli,
    config::{load_file_config, FileConfig, Overrides, RunConfig},
    error::GapError,
    runner,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<GapError>() {
                Some(gap) => {
                    error!("Run failed: {} ({})", gap, gap.error_code());
                    exit_code(gap)
                }
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// 2 for bad options or dates (as clap does for bad flags), 1 for data and file failures
fn exit_code(err: &GapError) -> ExitCode {
    if err.is_usage_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let from_file = match &cli.config {
        Some(path) => load_file_config(path)
            .and_then(FileConfig::into_overrides)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Overrides::default(),
    };

    let config = RunConfig::from_overrides(cli.overrides().or(from_file));
    init_logging(&config.log_level)?;

    info!(
        "Finding non-trading days in {} (mode {}, start {}, end {})",
        config.input_path.display(),
        config.mode,
        config.start,
        config.end
    );

    let report = runner::run(&config)?;
    Ok(runner::summary_line(&config, &report))
}

/// RUST_LOG wins over the configured level. Logs go to stderr; stdout carries the summary.
fn init_logging(level: &str) -> Result<(), GapError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| GapError::ConfigError(format!("Invalid log_level '{}': {}", level, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

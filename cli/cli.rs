mod cli_args;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use codereader_core::{AppError, Config, Pipeline, RunSummary};
use log;
use std::process;

use cli_args::Cli;

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let quiet = cli_args.quiet;
    let exit_code = match run_app(&cli_args) {
        Ok(summary) => {
            output::print_summary(&summary, quiet);
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            output::print_error(&e);
            e.downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code)
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn log_level(quiet: bool, verbose: u8) -> log::LevelFilter {
    match (quiet, verbose) {
        (true, _) => log::LevelFilter::Off,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = log_level(quiet, verbose);
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp(None)
        .init();
    log::trace!("Logging at {:?}", level);
}

fn run_app(cli: &Cli) -> Result<RunSummary> {
    let config_path = Config::resolve_config_path(cli.config.as_deref());
    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    log::info!("Flattening project '{}'", config.project);

    let pipeline = Pipeline::new(config).context("Failed to prepare the pipeline")?;
    let summary = pipeline.run().context("Failed to write the snapshot")?;
    Ok(summary)
}

//! Folio CLI: browse a portfolio catalog from the terminal.
//!
//! Lists projects featured-first with scroll-style paging, shows the
//! owner's profile, and manages the per-session project cache.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod output;

use clap::Parser;
use commands::{CacheAction, Cli, Commands};
use folio_config::{ConfigLoader, FolioConfig};
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    output::set_plain(cli.plain);

    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_file(path),
        None => ConfigLoader::new(),
    };
    let config = match loader.resolve(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Invalid configuration: {e}"));
            return ExitCode::FAILURE;
        }
    };
    debug!(
        api = %config.api_base(),
        session = %config.session_id,
        "resolved configuration"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("Failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_command(&cli, &config)) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run_command(cli: &Cli, config: &FolioConfig) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Projects(args) => commands::projects::run(args, config).await,
        Commands::Profile => commands::profile::run(config).await,
        Commands::Cache { action } => match action {
            CacheAction::Show => commands::cache::show(config),
            CacheAction::Clear => commands::cache::clear(config),
        },
    }
}

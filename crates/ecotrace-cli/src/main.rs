//! EcoTrace CLI
//!
//! Terminal front end for the EcoTrace session store, carbon estimator and
//! waste reporting. The signed-in session is kept in the data directory
//! between runs.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ecotrace_core::EcoTraceConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config_handlers;
mod presenter;
mod render;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(message) = commands::error_message(&e) {
                eprintln!("error: {message}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        data_dir,
        command,
    } = cli;

    match command {
        Command::Config { action } => {
            init_tracing(&EcoTraceConfig::default().log_filter);
            config_handlers::handle_config_command(
                config_path.as_deref(),
                data_dir,
                action,
                &mut std::io::stdout(),
            )
        }
        Command::Session(command) => {
            let mut config = EcoTraceConfig::load(config_path.as_deref())?;
            if let Some(dir) = data_dir {
                config.data_dir = Some(dir);
            }
            init_tracing(&config.log_filter);
            tracing::debug!(
                data_dir = %config.resolved_data_dir().display(),
                storage_key = %config.storage_key,
                "Opening session storage"
            );

            let mut app = commands::open(&config);
            commands::execute(&mut app, command, &mut std::io::stdout())
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

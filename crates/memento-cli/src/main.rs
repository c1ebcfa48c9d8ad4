//! Memento CLI - life clock, year heatmaps, goals and archive export
//!
//! This is the command-line interface for Memento. It loads the journal,
//! hands it to the core library and renders the result.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use memento_core::MementoError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::constants::{exit_codes, LOG_ENV};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let command = match &cli.command {
        Some(command) => command,
        None => {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    if let Commands::Completions { shell } = command {
        return commands::handle_completions(*shell);
    }

    let ctx = AppContext::new(cli)?;
    match command {
        Commands::Clock(args) => commands::handle_clock(&ctx, args),
        Commands::Years(args) => commands::handle_years(&ctx, args),
        Commands::Heatmap(args) => commands::handle_heatmap(&ctx, args),
        Commands::Goals(args) => commands::handle_goals(&ctx, args),
        Commands::Upcoming(args) => commands::handle_upcoming(&ctx, args),
        Commands::Export(args) => commands::handle_export(&ctx, args),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Log to stderr. `-v` wins over `MEMENTO_LOG`; without either, only
/// warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<MementoError>() {
        Some(MementoError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(MementoError::InvalidInput(_)) | Some(MementoError::Validation(_)) => {
            exit_codes::INVALID_INPUT
        }
        Some(
            MementoError::EmptyExport { .. }
            | MementoError::Cancelled
            | MementoError::Packaging(_)
            | MementoError::Fetch(_),
        ) => exit_codes::EXPORT_FAILED,
        _ => exit_codes::FAILURE,
    }
}

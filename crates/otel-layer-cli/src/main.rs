//! otel-layer CLI
//!
//! Hosts the OpenTelemetry layer plugin outside the serverless framework:
//! loads a service file, fires the packaging hook and writes the result.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        // Only fails if a subscriber is already installed
        let _ = tracing::subscriber::set_global_default(subscriber);
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            file,
            output,
            dry_run,
            overrides,
        } => commands::run_apply(&file, output.as_deref(), dry_run, overrides.into()),
        Commands::ShowConfig {
            file,
            json,
            overrides,
        } => commands::run_show_config(&file, json, overrides.into()),
        Commands::Env {
            file,
            function,
            json,
            overrides,
        } => commands::run_env(&file, &function, json, overrides.into()),
    }
}

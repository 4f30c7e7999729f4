//! Slipway CLI - a minimal incremental build orchestrator for C

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slipway::BuildError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<BuildError>()
            .map(BuildError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    // Logs go to stderr; stdout is reserved for `--plan` output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Clean(args) => commands::clean::execute(args),
        Commands::Format(args) => commands::format::execute(args),
    }
}

//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Slipway - a minimal incremental build orchestrator for C
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the incremental build pipeline
    Build(BuildArgs),

    /// Remove all generated artifacts
    Clean(CleanArgs),

    /// Run the external formatter over tracked files
    Format(FormatArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build variant (debug or release)
    #[arg(long, default_value = "debug", env = "SLIPWAY_VARIANT")]
    pub variant: String,

    /// Link-time optimization (on or off)
    #[arg(long, default_value = "off")]
    pub lto: String,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Emit the action plan as JSON instead of building
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct CleanArgs {}

#[derive(Args)]
pub struct FormatArgs {}

//! Command-line interface for connect-config
//!
//! Provides `get` (resolve a path through a config provider) and `worker`
//! (assemble worker properties from a base file and overrides).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod get;
mod utils;
mod worker;

/// Resolve sandboxed external configuration and assemble worker properties
#[derive(Parser)]
#[command(name = "connect-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path through a config provider
    Get(get::GetArgs),

    /// Build worker properties from a base file and --override pairs
    Worker(worker::WorkerArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Get(args) => get::run(args),
        Commands::Worker(args) => worker::run(args),
    }
}

//! psqr CLI — resolve did:psqr identifiers and validate identity documents.
//!
//! Subcommands: resolve, validate, init.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{LoggingConfig, PsqrConfig};

/// did:psqr resolver.
#[derive(Parser, Debug)]
#[command(name = "psqr", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "psqr.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a did:psqr DID to its document.
    Resolve(commands::resolve::ResolveArgs),
    /// Validate a local DID document or identity file.
    Validate(commands::validate::ValidateArgs),
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PsqrConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config.logging);

    match &cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &config).await,
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Init(args) => commands::init::run(args, &cli.config),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

//! Retrace CLI - retrace command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

/// Retrace - inspect and repair journal identities in saved documents
#[derive(Parser)]
#[command(name = "retrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/retrace/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List identity markers in a document
    Inspect {
        /// Document to read (JSON)
        path: PathBuf,
        /// Emit markers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report duplicate and malformed identifiers
    Check {
        /// Document to read (JSON)
        path: PathBuf,
    },
    /// Rewrite legacy `journal` markers to the configured tag
    Migrate {
        /// Document to rewrite (JSON)
        path: PathBuf,
        /// Write here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = retrace_cli::util::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { path, json } => cmd::inspect::run(&path, &config, json),
        Commands::Check { path } => cmd::check::run(&path, &config),
        Commands::Migrate { path, output } => cmd::migrate::run(&path, output.as_deref(), &config),
        Commands::Config => cmd::config::run(&config, cli.config.as_deref()),
    }
}

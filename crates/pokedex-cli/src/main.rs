//! Pokedex - interactive owner registry console
//!
//! Loads the reference catalog, then runs the menu session on the terminal.
//! Logs go to stderr so menu output on stdout stays clean.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pokedex::{Catalog, Registry};

mod input;
mod session;

use input::Terminal;
use session::Session;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "pokedex",
    about = "Manage owners and their Pokedex collections",
    version
)]
struct Cli {
    /// Catalog CSV with header `ID,Name,Type,HP,Attack,Can Evolve`
    #[clap(long, env = "POKEDEX_CATALOG", default_value = "hoenn_pokedex.csv")]
    catalog: PathBuf,

    /// Set log level (overridden by RUST_LOG)
    #[clap(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Print listings and the owner report as JSON
    #[clap(long)]
    json: bool,
}

fn initialize_tracing(level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("failed to load catalog from {}", cli.catalog.display()))?;
    info!(records = catalog.len(), "starting session");

    let terminal = Terminal::new().context("failed to open terminal")?;
    let stdout = io::stdout();
    let mut session = Session::new(Registry::new(catalog), terminal, stdout.lock(), cli.json);
    session.run()?;
    info!(owners = session.registry().index().len(), "session ended");
    Ok(())
}

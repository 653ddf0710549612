//! Strictly Grid - terminal front-end
//!
//! Drives a [`strictly_grid::GameEngine`] from stdin and prints the board to
//! stdout. Logs go to stderr, filtered by `RUST_LOG`.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_grid::{EngineConfig, GameEngine};
use terminal::Terminal;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { size, config } => run_play(size, config),
    }
}

/// Builds the engine from config file and flags, then runs the terminal loop.
#[instrument]
fn run_play(size: Option<usize>, config: Option<std::path::PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut engine = GameEngine::new(config);
    if let Some(size) = size {
        engine.configure(size).context("Invalid --size")?;
    }
    info!(size = %engine.config().board_size, "Starting terminal session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Terminal::new(engine, stdin.lock(), stdout.lock()).run()
}

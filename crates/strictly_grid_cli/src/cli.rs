//! Command-line interface for strictly_grid.

use clap::{Parser, Subcommand};

/// Strictly Grid - N×N tic-tac-toe for two local players
#[derive(Parser, Debug)]
#[command(name = "strictly_grid")]
#[command(about = "N×N tic-tac-toe for two players at one terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session in the terminal
    Play {
        /// Board side length (2-9); overrides the config file
        #[arg(short, long)]
        size: Option<usize>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}

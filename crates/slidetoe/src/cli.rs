//! Command-line interface for slidetoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// slidetoe - sliding-mark tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "slidetoe")]
#[command(about = "Two-player tic-tac-toe where each side keeps only three marks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "slidetoe.toml", global = true)]
    pub config: PathBuf,

    /// Override the snapshot file from the config
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match, reading one command per line from stdin
    Play {
        /// Round wins needed to take the match
        #[arg(long)]
        max_wins: Option<u32>,

        /// Do not read or write the snapshot file
        #[arg(long)]
        no_persist: bool,
    },

    /// Print the stored snapshot and exit
    Inspect,
}

//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tictac - server-authoritative tic-tac-toe over HTTP
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Server-authoritative tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        database: Option<String>,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Path to the database file
        #[arg(long, default_value = "tictac.db")]
        database: String,
    },

    /// Print the grid and outcome of a 9-character board such as "XXXOO    "
    Evaluate {
        /// Board encoding, row-major, using X, O and space
        board: String,
    },
}

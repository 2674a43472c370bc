//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Arth - Ask questions about your money
#[derive(Parser)]
#[command(name = "arth")]
#[command(about = "Personal finance advisor grounded in your own ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory of JSON ledger files (one `<user>.json` per user)
    ///
    /// Defaults to `ARTH_LEDGER_DIR`, then the platform data directory
    /// (e.g. ~/.local/share/arth/ledgers).
    #[arg(long, global = true)]
    pub ledger_dir: Option<PathBuf>,

    /// User whose ledger to read
    #[arg(long, default_value = "local-dev", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., frontend/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show dashboard summary (totals, insights, recent expenses)
    Summary {
        /// Read this ledger file instead of the ledger directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show income vs expense and spending by category
    Analytics {
        /// Read this ledger file instead of the ledger directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the advisory prompt that would be sent (no provider call)
    Prompt {
        /// Question to embed
        question: String,

        /// Read this ledger file instead of the ledger directory
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Ask one advisory question
    Ask {
        /// Question to ask
        question: String,

        /// Read this ledger file instead of the ledger directory
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Interactive advisory chat (empty line or Ctrl-D to quit)
    Chat {
        /// Read this ledger file instead of the ledger directory
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show resolved provider configuration
    Config,
}

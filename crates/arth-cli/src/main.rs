//! Arth CLI - Personal finance advisor
//!
//! Usage:
//!   arth summary                 Show dashboard for the current ledger
//!   arth ask "Where to invest?"  Ask one advisory question
//!   arth chat                    Interactive advisory session
//!   arth serve --port 3000       Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let source = commands::LedgerSource::new(cli.ledger_dir.clone(), &cli.user);

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&source, &host, port, static_dir.as_deref()).await,
        Commands::Summary { file, json } => commands::cmd_summary(&source, file.as_deref(), json),
        Commands::Analytics { file, json } => {
            commands::cmd_analytics(&source, file.as_deref(), json)
        }
        Commands::Prompt { question, file } => {
            commands::cmd_prompt(&source, file.as_deref(), &question)
        }
        Commands::Ask { question, file } => {
            let advisor = commands::advisor_from_env()?;
            commands::cmd_ask(&advisor, &source, file.as_deref(), &question).await
        }
        Commands::Chat { file } => {
            let advisor = commands::advisor_from_env()?;
            commands::cmd_chat(&advisor, &source, file.as_deref()).await
        }
        Commands::Config => commands::cmd_config(),
    }
}

//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use arth_server::ServerConfig;

use super::LedgerSource;

pub async fn cmd_serve(
    source: &LedgerSource,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let ledger_dir = source.dir()?;

    println!("🚀 Starting Arth web server...");
    println!("   Ledgers: {}", ledger_dir.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let allowed_origins = parse_allowed_origins(
        &std::env::var("ARTH_ALLOWED_ORIGINS").unwrap_or_default(),
    );
    if !allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", allowed_origins.join(", "));
    }
    println!();

    let config = ServerConfig { allowed_origins };
    let store = Arc::new(source.store()?);
    let static_dir = static_dir.map(|p| p.to_string_lossy().to_string());

    arth_server::serve_with_config(store, host, port, static_dir.as_deref(), config).await
}

/// Parse a comma-separated origin list
pub fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

//! Shared command utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use arth_core::config::default_ledger_dir;
use arth_core::{Advisor, JsonLedgerStore, LedgerSnapshot, LedgerStore, ProviderConfig};

/// Environment variable naming the ledger directory
pub const LEDGER_DIR_ENV: &str = "ARTH_LEDGER_DIR";

/// Where commands read ledgers from
pub struct LedgerSource {
    dir: Option<PathBuf>,
    user: String,
}

impl LedgerSource {
    pub fn new(dir: Option<PathBuf>, user: &str) -> Self {
        let dir = dir.or_else(|| {
            std::env::var(LEDGER_DIR_ENV)
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
        });
        Self {
            dir,
            user: user.to_string(),
        }
    }

    /// Resolved ledger directory
    pub fn dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_ledger_dir().context("Could not determine data directory"),
        }
    }

    pub fn store(&self) -> Result<JsonLedgerStore> {
        Ok(JsonLedgerStore::new(self.dir()?))
    }

    /// Snapshot from an explicit file, or the user's file in the ledger directory
    pub fn load(&self, file: Option<&Path>) -> Result<LedgerSnapshot> {
        let snapshot = match file {
            Some(path) => JsonLedgerStore::read_file(path)
                .with_context(|| format!("Failed to read ledger {}", path.display()))?,
            None => {
                let store = self.store()?;
                store
                    .load(&self.user)
                    .with_context(|| format!("Failed to load ledger for '{}'", self.user))?
            }
        };

        debug!(
            user = %self.user,
            incomes = snapshot.incomes.len(),
            expenses = snapshot.expenses.len(),
            upcoming = snapshot.upcoming_payments.len(),
            "Loaded ledger"
        );
        Ok(snapshot)
    }
}

/// Advisor wired from the environment and provider config
pub fn advisor_from_env() -> Result<Advisor> {
    let config = ProviderConfig::load().context("Failed to load provider config")?;
    Ok(Advisor::from_env(&config))
}

/// Truncate a string to max length, adding "..." if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

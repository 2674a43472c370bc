//! Ledger store
//!
//! Read-only access to a user's ledger. The advisor never writes ledger data;
//! the store is where a snapshot is taken once per aggregation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::LedgerSnapshot;

/// Source of ledger snapshots keyed by user id
pub trait LedgerStore: Send + Sync {
    /// Snapshot of the user's ledger; an unknown user has an empty ledger
    fn load(&self, user_id: &str) -> Result<LedgerSnapshot>;
}

/// Ensure a user id is safe to use as a file stem
pub fn validate_user_id(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= 128
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("Invalid user id: {:?}", user_id)))
    }
}

/// One JSON file per user: `<dir>/<user_id>.json`
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    dir: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, user_id: &str) -> Result<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.dir.join(format!("{}.json", user_id)))
    }

    /// Parse a single ledger file
    pub fn read_file(path: &Path) -> Result<LedgerSnapshot> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::InvalidData(format!("Invalid ledger file {}: {}", path.display(), e))
        })
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self, user_id: &str) -> Result<LedgerSnapshot> {
        let path = self.path_for(user_id)?;
        if !path.exists() {
            debug!(user = user_id, "No ledger file, using empty ledger");
            return Ok(LedgerSnapshot::default());
        }
        Self::read_file(&path)
    }
}

/// In-memory store for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledgers: RwLock<HashMap<String, LedgerSnapshot>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: &str, snapshot: LedgerSnapshot) -> Result<()> {
        validate_user_id(user_id)?;
        self.ledgers
            .write()
            .map_err(|_| Error::InvalidData("ledger store lock poisoned".into()))?
            .insert(user_id.to_string(), snapshot);
        Ok(())
    }

    pub fn with_ledger(self, user_id: &str, snapshot: LedgerSnapshot) -> Result<Self> {
        self.insert(user_id, snapshot)?;
        Ok(self)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self, user_id: &str) -> Result<LedgerSnapshot> {
        validate_user_id(user_id)?;
        let ledgers = self
            .ledgers
            .read()
            .map_err(|_| Error::InvalidData("ledger store lock poisoned".into()))?;
        Ok(ledgers.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    #[test]
    fn test_validate_user_id() {
        for ok in ["local-dev", "user_42", "ABC"] {
            assert!(validate_user_id(ok).is_ok(), "{}", ok);
        }
        for bad in ["", "../etc/passwd", "a/b", "a.json", "user id", "é"] {
            assert!(validate_user_id(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path());

        let snapshot = store.load("nobody").unwrap();
        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn test_json_store_reads_ledger() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("asha.json"),
            r#"{
                "budget": 20000,
                "incomes": [{"amount": 50000, "source": "Salary", "date": "2024-03-01"}],
                "expenses": [
                    {"amount": 1200, "category": "Food", "description": "Groceries", "date": "2024-03-02"},
                    {"amount": "oops", "category": "Food"}
                ],
                "upcomingPayments": [
                    {"title": "Rent", "amount": 15000, "dueDate": "2024-03-28", "status": "pending"}
                ]
            }"#,
        )
        .unwrap();

        let snapshot = JsonLedgerStore::new(dir.path()).load("asha").unwrap();

        assert_eq!(snapshot.budget, 20000.0);
        assert_eq!(snapshot.incomes[0].label(), Some("Salary"));
        assert_eq!(snapshot.expenses.len(), 2);
        assert_eq!(snapshot.expenses[0].note.as_deref(), Some("Groceries"));
        assert_eq!(snapshot.expenses[1].amount, None);
        assert_eq!(snapshot.upcoming_payments[0].status, PaymentStatus::Pending);
    }

    #[test]
    fn test_json_store_rejects_bad_user_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path());

        assert!(matches!(
            store.load("../secrets"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_json_store_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let result = JsonLedgerStore::new(dir.path()).load("broken");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryLedgerStore::new()
            .with_ledger(
                "local-dev",
                LedgerSnapshot {
                    budget: 500.0,
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.load("local-dev").unwrap().budget, 500.0);
        assert_eq!(store.load("someone-else").unwrap().budget, 0.0);
    }
}

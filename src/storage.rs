//! Persistence of tracked loans in a flat key-value store.
//!
//! All loans live in a single document under one key: a JSON object mapping
//! loan id to `{ "loanDetails": ..., "payments": [...] }`. The whole document
//! is rewritten after every change, last write wins.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CalculatorConfig;
use crate::types::{LoanParameters, ScheduledPayment};

/// Minimal string key-value contract the storage layer needs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps each key in `<root>/<key>.json`. The directory is created on the
/// first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Reads the file behind `key`. A missing file is `Ok(None)`; any other
    /// I/O failure is an error.
    pub fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %format!("{e:#}"), "stored data is unreadable");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// One persisted loan: its parameters and the payment list with tracking state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLoan {
    pub loan_details: LoanParameters,
    pub payments: Vec<ScheduledPayment>,
}

pub type StoredLoans = BTreeMap<String, StoredLoan>;

/// Decoded view of the stored-loans document, written back through `S`.
#[derive(Debug)]
pub struct LoanStorage<S: KeyValueStore> {
    store: S,
    key: String,
    loans: StoredLoans,
}

impl<S: KeyValueStore> LoanStorage<S> {
    /// Reads the document under `key`. Missing or unreadable data yields an
    /// empty collection.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let loans = match store.get(&key) {
            Some(raw) => match serde_json::from_str::<StoredLoans>(&raw) {
                Ok(loans) => {
                    info!(count = loans.len(), key = %key, "loaded stored loans");
                    loans
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "failed to load stored loans, starting empty");
                    StoredLoans::new()
                }
            },
            None => StoredLoans::new(),
        };
        Self { store, key, loans }
    }

    pub fn with_config(store: S, cfg: &CalculatorConfig) -> Self {
        Self::open(store, cfg.storage_key.clone())
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.loans).context("failed to encode stored loans")?;
        self.store.set(&self.key, &raw)
    }

    /// Inserts or replaces a loan, stamping `updatedAt` with the current time.
    pub fn save_loan(
        &mut self,
        loan_details: &LoanParameters,
        payments: &[ScheduledPayment],
    ) -> anyhow::Result<()> {
        let mut loan_details = loan_details.clone();
        loan_details.updated_at = Utc::now();
        let id = loan_details.id.clone();
        self.loans.insert(
            id.clone(),
            StoredLoan {
                loan_details,
                payments: payments.to_vec(),
            },
        );
        self.persist()?;
        info!(loan_id = %id, payments = payments.len(), "saved loan");
        Ok(())
    }

    pub fn load_loan(&self, loan_id: &str) -> Option<&StoredLoan> {
        self.loans.get(loan_id)
    }

    /// Returns whether a loan was removed.
    pub fn delete_loan(&mut self, loan_id: &str) -> anyhow::Result<bool> {
        if self.loans.remove(loan_id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn all_loans(&self) -> Vec<&StoredLoan> {
        self.loans.values().collect()
    }

    /// Replaces the payment list of an existing loan. Unknown ids are left
    /// alone and reported as `false`.
    pub fn update_payments(
        &mut self,
        loan_id: &str,
        payments: &[ScheduledPayment],
    ) -> anyhow::Result<bool> {
        let Some(loan) = self.loans.get_mut(loan_id) else {
            return Ok(false);
        };
        loan.loan_details.updated_at = Utc::now();
        loan.payments = payments.to_vec();
        self.persist()?;
        Ok(true)
    }

    /// The whole collection as pretty-printed JSON.
    pub fn export_data(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.loans).context("failed to encode stored loans")
    }

    /// Replaces the collection with a previously exported document.
    ///
    /// Returns `false` and keeps the current loans when the document does not
    /// have the expected structure or cannot be written back.
    pub fn import_data(&mut self, raw: &str) -> bool {
        let imported = match serde_json::from_str::<StoredLoans>(raw) {
            Ok(loans) => loans,
            Err(e) => {
                warn!(error = %e, "rejected loan import");
                return false;
            }
        };

        let previous = std::mem::replace(&mut self.loans, imported);
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist imported loans");
            self.loans = previous;
            return false;
        }
        info!(count = self.loans.len(), "imported loans");
        true
    }

    pub fn clear_all_data(&mut self) -> anyhow::Result<()> {
        self.loans.clear();
        self.store.remove(&self.key)
    }

    pub fn loans(&self) -> &StoredLoans {
        &self.loans
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

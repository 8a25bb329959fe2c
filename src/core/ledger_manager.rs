use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::random::ThreadRandom;
use crate::core::services::{
    BudgetService, ServiceError, ServiceResult, SummaryService, TransactionService,
};
use crate::errors::StorageError;
use crate::ledger::{
    BudgetCategory, CategoryBudget, MonthlySummary, Transaction, TransactionCategory,
    TransactionPatch,
};
use crate::sample;
use crate::storage::{JsonFileStore, KeyValueStore, SeededStore, StorageKeys};

/// Recoverable conditions surfaced to whoever presents ledger feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    TransactionNotFound(String),
    BudgetNotFound(BudgetCategory),
    /// The in-memory state was kept but the store may now be stale.
    WriteFailed { key: String, message: String },
    /// A stored document was unreadable and an empty collection was used.
    ReadFallback { key: String, message: String },
}

pub trait LedgerObserver: Send + Sync {
    fn notify(&self, event: &LedgerEvent);
}

/// Observer that reports events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LedgerObserver for TracingObserver {
    fn notify(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::TransactionNotFound(id) => warn!(%id, "transaction not found"),
            LedgerEvent::BudgetNotFound(category) => warn!(%category, "budget not found"),
            LedgerEvent::WriteFailed { key, message } => {
                warn!(%key, %message, "failed to persist document; keeping in-memory state")
            }
            LedgerEvent::ReadFallback { key, message } => {
                warn!(%key, %message, "unreadable document; starting from an empty collection")
            }
        }
    }
}

/// Owns the session's transactions and budgets and keeps every budget's
/// `spent` in line with the transaction history.
///
/// Collections are read from the store once, when the manager is built. Each
/// mutation rewrites the whole affected document. A failed write is reported
/// to the observer and remembered in [`Self::unsynced_keys`], while the
/// in-memory collections remain authoritative for the rest of the session.
pub struct LedgerManager {
    storage: Box<dyn KeyValueStore>,
    observer: Box<dyn LedgerObserver>,
    keys: StorageKeys,
    transactions: Vec<Transaction>,
    budgets: Vec<CategoryBudget>,
    unsynced: BTreeSet<String>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_options(storage, StorageKeys::default(), Box::new(TracingObserver))
    }

    pub fn with_options(
        storage: Box<dyn KeyValueStore>,
        keys: StorageKeys,
        observer: Box<dyn LedgerObserver>,
    ) -> Self {
        let mut manager = Self {
            storage,
            observer,
            keys,
            transactions: Vec::new(),
            budgets: Vec::new(),
            unsynced: BTreeSet::new(),
        };
        manager.reload();
        manager
    }

    /// Builds a file-backed session from `config`, serving demo data for
    /// documents that were never written when enabled.
    pub fn open_with_config(config: &Config) -> ServiceResult<Self> {
        config.validate()?;
        let keys = config.storage_keys();
        let store = JsonFileStore::new(Some(config.resolve_data_dir()))?;
        let storage: Box<dyn KeyValueStore> = if config.seed_demo_data {
            let dataset = sample::default_dataset(
                &mut ThreadRandom,
                config.demo_transaction_count,
                Utc::now().date_naive(),
            );
            Box::new(SeededStore::with_dataset(store, dataset, &keys)?)
        } else {
            Box::new(store)
        };
        let manager = Self::with_options(storage, keys, Box::new(TracingObserver));
        info!(
            transactions = manager.transactions.len(),
            budgets = manager.budgets.len(),
            "ledger session opened"
        );
        Ok(manager)
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[CategoryBudget] {
        &self.budgets
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        TransactionService::find(&self.transactions, id)
    }

    pub fn budget(&self, category: BudgetCategory) -> Option<&CategoryBudget> {
        BudgetService::find(&self.budgets, category)
    }

    /// Discards in-memory state and reads both documents from the store again.
    pub fn reload(&mut self) {
        let transactions_key = self.keys.transactions.clone();
        let budgets_key = self.keys.budgets.clone();
        self.transactions = self.load_collection(&transactions_key);
        self.budgets = self.load_collection(&budgets_key);
        self.unsynced.clear();
    }

    /// Records a new entry at the head of the list.
    pub fn add_transaction(
        &mut self,
        merchant: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: TransactionCategory,
        date: impl Into<String>,
    ) -> Transaction {
        let transaction = Transaction::new(merchant, description, amount, category, date);
        let created = TransactionService::add(&mut self.transactions, transaction).clone();
        debug!(id = %created.id, amount = created.amount, "transaction added");
        self.persist_transactions();
        self.recompute_budget_spent();
        created
    }

    /// Merges `patch` into an existing entry. `None` when `id` is unknown.
    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> Option<Transaction> {
        let result = self.update_transaction_checked(id, patch);
        self.report(result)
    }

    pub fn update_transaction_checked(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> ServiceResult<Transaction> {
        let updated = TransactionService::update(&mut self.transactions, id, patch)?;
        debug!(%id, "transaction updated");
        self.persist_transactions();
        self.recompute_budget_spent();
        Ok(updated)
    }

    /// Removes an entry, returning whether anything was removed.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let result = self.delete_transaction_checked(id);
        self.report(result).is_some()
    }

    pub fn delete_transaction_checked(&mut self, id: &str) -> ServiceResult<Transaction> {
        let removed = TransactionService::remove(&mut self.transactions, id)?;
        debug!(%id, "transaction deleted");
        self.persist_transactions();
        self.recompute_budget_spent();
        Ok(removed)
    }

    /// Creates or overwrites the budget for `category` and returns it with
    /// `spent` reconciled.
    pub fn set_category(&mut self, category: BudgetCategory, budgeted: f64) -> CategoryBudget {
        let index = BudgetService::upsert(&mut self.budgets, category, budgeted);
        debug!(%category, budgeted, "budget set");
        self.persist_budgets();
        self.recompute_budget_spent();
        self.budgets[index].clone()
    }

    /// Removes the budget for `category`, returning whether one existed.
    pub fn delete_budget(&mut self, category: BudgetCategory) -> bool {
        let result = self.delete_budget_checked(category);
        self.report(result).is_some()
    }

    pub fn delete_budget_checked(
        &mut self,
        category: BudgetCategory,
    ) -> ServiceResult<CategoryBudget> {
        let removed = BudgetService::remove(&mut self.budgets, category)?;
        debug!(%category, "budget deleted");
        self.persist_budgets();
        Ok(removed)
    }

    /// Fully re-derives every budget's `spent` from the transaction history.
    pub fn recompute_budget_spent(&mut self) {
        BudgetService::recompute_spent(&mut self.budgets, &self.transactions);
        self.persist_budgets();
    }

    pub fn summary(&self, reference: NaiveDate) -> MonthlySummary {
        SummaryService::calculate(&self.transactions, reference)
    }

    pub fn current_summary(&self) -> MonthlySummary {
        SummaryService::current(&self.transactions)
    }

    /// Keys whose latest write failed, so the store may lag behind memory.
    pub fn unsynced_keys(&self) -> Vec<&str> {
        self.unsynced.iter().map(String::as_str).collect()
    }

    /// Rewrites both documents on explicit request. Both writes are attempted;
    /// the first failure is returned.
    pub fn flush(&mut self) -> ServiceResult<()> {
        let documents = [
            (
                self.keys.transactions.clone(),
                serde_json::to_value(&self.transactions),
            ),
            (self.keys.budgets.clone(), serde_json::to_value(&self.budgets)),
        ];
        let mut first_error = None;
        for (key, value) in documents {
            let outcome = value
                .map_err(StorageError::from)
                .and_then(|value| self.storage.set(&key, &value));
            match outcome {
                Ok(()) => {
                    self.unsynced.remove(&key);
                }
                Err(err) => {
                    self.unsynced.insert(key);
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn report<T>(&self, result: ServiceResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(ServiceError::TransactionNotFound(id)) => {
                self.observer.notify(&LedgerEvent::TransactionNotFound(id));
                None
            }
            Err(ServiceError::BudgetNotFound(category)) => {
                self.observer.notify(&LedgerEvent::BudgetNotFound(category));
                None
            }
            Err(err) => {
                warn!(error = %err, "ledger operation failed");
                None
            }
        }
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let fallback = |message: String| {
            self.observer.notify(&LedgerEvent::ReadFallback {
                key: key.to_string(),
                message,
            });
            Vec::new()
        };
        match self.storage.get(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(items) => items,
                Err(err) => fallback(err.to_string()),
            },
            Ok(None) => {
                debug!(%key, "no stored document; starting empty");
                Vec::new()
            }
            Err(err) => fallback(err.to_string()),
        }
    }

    fn persist_transactions(&mut self) {
        let key = self.keys.transactions.clone();
        let value = serde_json::to_value(&self.transactions);
        self.write_document(key, value);
    }

    fn persist_budgets(&mut self) {
        let key = self.keys.budgets.clone();
        let value = serde_json::to_value(&self.budgets);
        self.write_document(key, value);
    }

    fn write_document(&mut self, key: String, value: serde_json::Result<Value>) {
        let outcome = value
            .map_err(StorageError::from)
            .and_then(|value| self.storage.set(&key, &value));
        match outcome {
            Ok(()) => {
                self.unsynced.remove(&key);
            }
            Err(err) => {
                self.observer.notify(&LedgerEvent::WriteFailed {
                    key: key.clone(),
                    message: err.to_string(),
                });
                self.unsynced.insert(key);
            }
        }
    }
}

use std::collections::HashMap;

use serde_json::Value;

use crate::ledger::{CategoryBudget, Transaction};

use super::{KeyValueStore, Result, StorageKeys};

/// First-run data returned for keys the backing store has never written.
#[derive(Debug, Clone, Default)]
pub struct DefaultDataset {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<CategoryBudget>,
}

impl DefaultDataset {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<CategoryBudget>) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    pub fn into_entries(self, keys: &StorageKeys) -> Result<HashMap<String, Value>> {
        let mut entries = HashMap::new();
        entries.insert(
            keys.transactions.clone(),
            serde_json::to_value(self.transactions)?,
        );
        entries.insert(keys.budgets.clone(), serde_json::to_value(self.budgets)?);
        Ok(entries)
    }
}

/// Wraps a store so that reads of missing keys fall back to a default value
/// resolved once at construction.
pub struct SeededStore<S> {
    inner: S,
    defaults: HashMap<String, Value>,
}

impl<S: KeyValueStore> SeededStore<S> {
    pub fn new(inner: S, defaults: HashMap<String, Value>) -> Self {
        Self { inner, defaults }
    }

    pub fn with_dataset(inner: S, dataset: DefaultDataset, keys: &StorageKeys) -> Result<Self> {
        Ok(Self::new(inner, dataset.into_entries(keys)?))
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: KeyValueStore> KeyValueStore for SeededStore<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.inner.get(key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.defaults.get(key).cloned()),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

pub mod json_backend;
pub mod memory;
pub mod seeded;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BUDGETS_KEY: &str = "budgets";

/// Abstraction over key-value backends holding whole JSON documents.
///
/// Every write replaces the full document stored under `key`; there are no
/// partial patches.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Names of the two documents the ledger reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub transactions: String,
    pub budgets: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            transactions: TRANSACTIONS_KEY.into(),
            budgets: BUDGETS_KEY.into(),
        }
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use seeded::{DefaultDataset, SeededStore};

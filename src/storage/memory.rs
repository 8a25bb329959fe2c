use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use serde_json::Value;

use crate::errors::StorageError;

use super::{KeyValueStore, Result};

/// In-process store, the closest analogue of browser local storage.
///
/// An optional quota caps the total serialized size of all entries; writes
/// that would exceed it fail and leave the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Stores raw text under `key`, bypassing JSON encoding.
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) -> Result<()> {
        self.lock()?.insert(key.to_string(), raw.into());
        Ok(())
    }

    pub fn raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.lock()?.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        let mut entries = self.lock()?;
        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, raw)| existing.len() + raw.len())
                .sum();
            let needed = others + key.len() + encoded.len();
            if needed > quota {
                return Err(StorageError::Unavailable(format!(
                    "quota exceeded writing `{key}` ({needed} of {quota} bytes)"
                )));
            }
        }
        entries.insert(key.to_string(), encoded);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

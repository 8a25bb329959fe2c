#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use finance_core::errors::StorageError;
use finance_core::storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageKeys};
use finance_core::{LedgerEvent, LedgerManager, LedgerObserver};
use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Observer that keeps every event for later assertions.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().expect("lock events").clone()
    }
}

impl LedgerObserver for RecordingObserver {
    fn notify(&self, event: &LedgerEvent) {
        self.events.lock().expect("lock events").push(event.clone());
    }
}

/// Store shared between the manager under test and the test body.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<MemoryStore>,
    fail_writes: Arc<Mutex<bool>>,
    failing_key: Arc<Mutex<Option<String>>>,
}

impl SharedStore {
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("lock flag") = fail;
    }

    /// Rejects writes to `key` only, regardless of the global flag.
    pub fn fail_writes_for(&self, key: Option<&str>) {
        *self.failing_key.lock().expect("lock key") = key.map(str::to_string);
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let key_blocked = self.failing_key.lock().expect("lock key").as_deref() == Some(key);
        if key_blocked || *self.fail_writes.lock().expect("lock flag") {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Manager over an in-memory store with a recording observer.
pub fn setup_memory_ledger() -> (LedgerManager, SharedStore, RecordingObserver) {
    let store = SharedStore::default();
    let observer = RecordingObserver::default();
    let manager = LedgerManager::with_options(
        Box::new(store.clone()),
        StorageKeys::default(),
        Box::new(observer.clone()),
    );
    (manager, store, observer)
}

/// Manager over a JSON directory that survives for the whole test run.
pub fn setup_file_ledger() -> (LedgerManager, std::path::PathBuf) {
    let base = temp_base();
    let store = JsonFileStore::new(Some(base.clone())).expect("create json store");
    (LedgerManager::new(Box::new(store)), base)
}

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, data_dir_in, ensure_dir},
    errors::{ServiceError, StorageError},
    storage::{json_backend::replace_file, StorageKeys, BUDGETS_KEY, TRANSACTIONS_KEY},
};

const DEFAULT_DEMO_TRANSACTIONS: usize = 70;

/// Startup settings for a ledger session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the directory holding persisted documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Serve generated demo data until the first write of each document.
    #[serde(default = "Config::default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default = "Config::default_demo_transaction_count")]
    pub demo_transaction_count: usize,
    #[serde(default = "Config::default_transactions_key")]
    pub transactions_key: String,
    #[serde(default = "Config::default_budgets_key")]
    pub budgets_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_demo_data: Self::default_seed_demo_data(),
            demo_transaction_count: Self::default_demo_transaction_count(),
            transactions_key: Self::default_transactions_key(),
            budgets_key: Self::default_budgets_key(),
        }
    }
}

impl Config {
    pub fn default_seed_demo_data() -> bool {
        true
    }

    pub fn default_demo_transaction_count() -> usize {
        DEFAULT_DEMO_TRANSACTIONS
    }

    pub fn default_transactions_key() -> String {
        TRANSACTIONS_KEY.into()
    }

    pub fn default_budgets_key() -> String {
        BUDGETS_KEY.into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => data_dir_in(&app_data_dir()),
        }
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            transactions: self.transactions_key.clone(),
            budgets: self.budgets_key.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.transactions_key.trim().is_empty() || self.budgets_key.trim().is_empty() {
            return Err(ServiceError::Invalid("storage keys must not be empty".into()));
        }
        if self.transactions_key == self.budgets_key {
            return Err(ServiceError::Invalid(format!(
                "transactions and budgets share the key `{}`",
                self.budgets_key
            )));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] as a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ServiceError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ServiceError> {
        ensure_dir(&base).map_err(StorageError::from)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, ServiceError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(StorageError::from)?;
        let config: Config = serde_json::from_str(&data).map_err(StorageError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ServiceError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config).map_err(StorageError::from)?;
        replace_file(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert!(config.seed_demo_data);
        assert_eq!(config.storage_keys(), StorageKeys::default());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = Config {
            data_dir: Some(dir.path().join("store")),
            seed_demo_data: false,
            demo_transaction_count: 12,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
        assert_eq!(config.resolve_data_dir(), dir.path().join("store"));
    }

    #[test]
    fn save_replaces_the_file_without_leftovers() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        manager.save(&Config::default()).expect("first save");
        let updated = Config {
            demo_transaction_count: 5,
            ..Config::default()
        };
        manager.save(&updated).expect("second save");
        assert_eq!(manager.load().expect("load").demo_transaction_count, 5);
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), r#"{"seed_demo_data": false}"#).expect("write");
        let config = manager.load().expect("load");
        assert!(!config.seed_demo_data);
        assert_eq!(config.transactions_key, "transactions");
        assert_eq!(config.demo_transaction_count, 70);
    }

    #[test]
    fn shared_keys_are_rejected() {
        let config = Config {
            budgets_key: "transactions".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ServiceError::Invalid(_))));
    }
}

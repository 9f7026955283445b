use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::account::AccountId;
use crate::core::traits::configuration_store::ConfigurationStore;

/// account -> key -> value
type StoreData = BTreeMap<String, BTreeMap<String, String>>;

/// Configuration store persisted as a single JSON document.
///
/// Values are kept as strings so the file stays human-readable:
///
/// ```text
/// {
///   "alice@cloud.example.org": {
///     "push": "{\"pushToken\":\"https://up.example/abc\",\"shouldBeDeleted\":false}"
///   }
/// }
/// ```
///
/// Every write replaces the file atomically through a temp file in the
/// same directory.
pub struct FileConfigurationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConfigurationStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Account ids that currently have at least one stored value.
    pub fn accounts(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    fn load(&self) -> Result<StoreData> {
        if !self.path.exists() {
            return Ok(StoreData::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| PushGuardError::StoreError {
            detail: format!("Cannot read {}: {e}", self.path.display()),
        })?;
        if content.trim().is_empty() {
            return Ok(StoreData::new());
        }

        serde_json::from_str(&content).map_err(|e| PushGuardError::StoreError {
            detail: format!("{} is not a valid store file: {e}", self.path.display()),
        })
    }

    fn save(&self, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data).map_err(|e| PushGuardError::StoreError {
            detail: format!("Failed to serialize store: {e}"),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| PushGuardError::StoreError {
            detail: format!("Cannot replace {}: {e}", self.path.display()),
        })?;
        Ok(())
    }

    /// Read-modify-write under the in-process lock.
    fn update(&self, change: impl FnOnce(&mut StoreData)) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| PushGuardError::StoreError {
            detail: "store lock poisoned".into(),
        })?;
        let mut data = self.load()?;
        change(&mut data);
        self.save(&data)
    }
}

impl ConfigurationStore for FileConfigurationStore {
    fn get(&self, account: &AccountId, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self.load()?;
        Ok(data
            .get(account.as_str())
            .and_then(|values| values.get(key))
            .map(|value| value.clone().into_bytes()))
    }

    fn put(&self, account: &AccountId, key: &str, value: &[u8]) -> Result<()> {
        let value = String::from_utf8(value.to_vec()).map_err(|_| PushGuardError::StoreError {
            detail: format!("Value for '{account}/{key}' is not valid UTF-8"),
        })?;
        self.update(|data| {
            data.entry(account.to_string())
                .or_default()
                .insert(key.to_string(), value);
        })
    }

    fn delete(&self, account: &AccountId, key: &str) -> Result<()> {
        self.update(|data| {
            if let Some(values) = data.get_mut(account.as_str()) {
                values.remove(key);
                if values.is_empty() {
                    data.remove(account.as_str());
                }
            }
        })
    }
}

//! JSON file preference store.
//!
//! The file holds a flat JSON object of string values. It is re-read on every
//! access so edits made by another process are picked up at lookup time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error_handling::PreferenceError;

use super::store::PreferenceStore;

/// Preference store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| PreferenceError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let content = serde_json::to_string_pretty(values).map_err(|source| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)?;
        log::debug!("Saved preference {} to {}", key, self.path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
            log::debug!("Removed preference {} from {}", key, self.path.display());
        }
        Ok(())
    }
}

//! API key preference accessor/mutator.

use std::sync::{Arc, RwLock};

use crate::config::API_KEY_PREFERENCE;
use crate::error_handling::PreferenceError;

use super::store::PreferenceStore;

/// Result of applying a new API key value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyChange {
    /// A non-empty key was persisted.
    Saved,
    /// The persisted key was removed.
    Removed,
}

/// The provider API key, persisted in a `PreferenceStore`.
///
/// An absent or empty key means the free tier. A session override (from the
/// environment) takes precedence over the stored value until the user saves
/// or clears the key explicitly.
#[derive(Clone)]
pub struct ApiKeyPreference {
    store: Arc<dyn PreferenceStore>,
    session_override: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiKeyPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyPreference")
            .field("is_set", &self.get().is_some())
            .finish()
    }
}

impl ApiKeyPreference {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            session_override: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses `key` for this process only, without persisting it.
    pub fn with_session_override(self, key: Option<String>) -> Self {
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        *self
            .session_override
            .write()
            .unwrap_or_else(|e| e.into_inner()) = key;
        self
    }

    /// Reads the active key.
    ///
    /// A store read failure is logged and treated as "no key" so lookups fall
    /// back to the free tier instead of failing.
    pub fn get(&self) -> Option<String> {
        let session = self
            .session_override
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if session.is_some() {
            return session;
        }
        match self.store.get(API_KEY_PREFERENCE) {
            Ok(value) => value.filter(|k| !k.trim().is_empty()),
            Err(e) => {
                log::warn!("Failed to read API key preference: {}", e);
                None
            }
        }
    }

    /// Trims `raw` and persists it, or removes the key when the result is empty.
    pub fn set(&self, raw: &str) -> Result<ApiKeyChange, PreferenceError> {
        *self
            .session_override
            .write()
            .unwrap_or_else(|e| e.into_inner()) = None;

        let key = raw.trim();
        if key.is_empty() {
            self.store.remove(API_KEY_PREFERENCE)?;
            log::info!("API key removed; using free endpoint");
            Ok(ApiKeyChange::Removed)
        } else {
            self.store.set(API_KEY_PREFERENCE, key)?;
            log::info!("API key saved; using pro endpoint");
            Ok(ApiKeyChange::Saved)
        }
    }
}

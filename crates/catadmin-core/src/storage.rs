//! Durable client-side key-value storage.
//!
//! The session container persists exactly two keys through this trait:
//! [`TOKEN_KEY`] and [`ABILITIES_KEY`]. Operations are synchronous so that
//! persisted state never lags the in-memory session.

use crate::error::{AdminError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-encoded list of ability tags.
pub const ABILITIES_KEY: &str = "abilities";

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage, used in tests and for `--ephemeral` CLI runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AdminError::storage("in-memory store lock poisoned"))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

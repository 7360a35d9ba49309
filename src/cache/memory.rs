//! In-process cache, for tests and dry runs

use super::traits::{Cache, CacheResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Cache holding entries as serialized JSON text in memory.
///
/// Entries are stored as text rather than `Value` so that a round trip
/// behaves exactly like the file-backed cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store raw text under `key`, bypassing serialization
    pub fn insert_raw(&self, key: &str, text: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), text.into());
    }
}

impl Cache for MemoryCache {
    fn get_value(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let text = entries.get(key)?;
        match serde_json::from_str(text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    fn set_value(&self, key: &str, value: &Value) -> CacheResult<()> {
        let text = serde_json::to_string(value)?;
        self.insert_raw(key, text);
        Ok(())
    }

    fn clear(&self) -> CacheResult<usize> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }
}

//! Cache trait definitions

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing or clearing a cache.
///
/// Reads never produce these: a missing or unreadable entry is a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to commit cache entry: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// A flat, durable memo table of JSON documents keyed by string.
///
/// No expiry, no size bound, no eviction; `clear()` is the only way an
/// entry goes away. Implementations must be safe to share across threads,
/// though concurrent writers to the same key are not coordinated.
pub trait Cache: Send + Sync {
    /// Raw lookup. `None` for a missing entry and for one that does not
    /// parse as JSON.
    fn get_value(&self, key: &str) -> Option<Value>;

    /// Store a document under `key`, replacing any previous entry.
    ///
    /// A concurrent reader observes either the old or the new document,
    /// never a partial one.
    fn set_value(&self, key: &str, value: &Value) -> CacheResult<()>;

    /// Remove every entry this cache created. Returns the number removed.
    fn clear(&self) -> CacheResult<usize>;

    /// Typed lookup.
    ///
    /// An entry that exists but does not deserialize into `T` is treated
    /// exactly like a missing one.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "cache entry has unexpected shape, treating as miss");
                None
            }
        }
    }

    /// Typed store
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set_value(key, &value)
    }
}

/// Extension trait for opening caches backed by a directory
pub trait OpenCache: Cache + Sized {
    /// Open a cache rooted at `dir`, creating the directory if absent
    fn open(dir: impl AsRef<Path>) -> CacheResult<Self>;
}

/// Cache key for the persisted network
pub const NETWORK_KEY: &str = "network";

/// Cache key for a character's thumbnail URL
pub fn image_key(character: &str) -> String {
    format!("image_{}", character)
}

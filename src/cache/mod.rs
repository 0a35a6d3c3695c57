//! Read-through cache for provider responses
//!
//! Resolvers talk to a [`CacheStore`] through the typed [`get`](CacheStore::get)
//! and [`set`](CacheStore::set) helpers. Entries are JSON text keyed by a
//! namespaced, normalized [`CacheKey`].

pub mod file_cache;
pub mod memory_cache;

pub use file_cache::FileCache;
pub use memory_cache::MemoryCache;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Normalized key identifying one cacheable lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for an icon search term
    pub fn icon(term: &str) -> Self {
        Self::namespaced("icon", term)
    }

    /// Key for a scripture reference
    pub fn verse(reference: &str) -> Self {
        Self::namespaced("verse", reference)
    }

    fn namespaced(namespace: &str, input: &str) -> Self {
        let normalized: String = input
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        CacheKey(format!("{}_{}", namespace, normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key/value storage for serialized cache entries.
///
/// Implementations never fail: a read problem is a miss and a write problem
/// is logged and dropped.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Raw JSON payload stored under `key`, if any
    async fn read(&self, key: &CacheKey) -> Option<String>;

    /// Store `payload` under `key`, replacing any previous entry
    async fn write(&self, key: &CacheKey, payload: String);
}

impl dyn CacheStore {
    /// Get a cached value, treating undecodable entries as misses
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let payload = self.read(key).await?;
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Failed to parse cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Serialize and store a value
    pub async fn set<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, json).await,
            Err(e) => log::warn!("Failed to serialize cache entry {}: {}", key, e),
        }
    }
}

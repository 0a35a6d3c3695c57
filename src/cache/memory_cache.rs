//! In-process cache used where touching the filesystem is unwanted

use super::{CacheKey, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if an entry is cached
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries().contains_key(key.as_str())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn read(&self, key: &CacheKey) -> Option<String> {
        self.entries().get(key.as_str()).cloned()
    }

    async fn write(&self, key: &CacheKey, payload: String) {
        self.entries().insert(key.as_str().to_string(), payload);
    }
}

//! On-disk cache, one JSON file per key
//!
//! Entries live at `<cache_dir>/<key>.json` and are never expired. The
//! directory is created lazily on the first write.

use super::{CacheKey, CacheStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Persistent cache backed by individual files
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Get the full path for the entry stored under `key`
    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl CacheStore for FileCache {
    async fn read(&self, key: &CacheKey) -> Option<String> {
        let path = self.entry_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(payload) => {
                log::debug!("Cache hit: {}", key);
                Some(payload)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Cache read error for {}: {}", key, e);
                None
            }
        }
    }

    async fn write(&self, key: &CacheKey, payload: String) {
        if let Err(e) = tokio::fs::create_dir_all(&self.cache_dir).await {
            log::warn!(
                "Failed to create cache directory {}: {}",
                self.cache_dir.display(),
                e
            );
            return;
        }

        let path = self.entry_path(key);
        if let Err(e) = tokio::fs::write(&path, payload).await {
            log::warn!("Cache write error for {}: {}", key, e);
        } else {
            log::debug!("Cached {}", key);
        }
    }
}

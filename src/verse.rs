//! Verse resolution with degrade-to-text failure handling
//!
//! [`VerseResolver::resolve`] always produces a [`VerseResult`]. Provider
//! failures become readable `content` so every card still renders.

use crate::api::{BibleClient, BiblePassage};
use crate::cache::{CacheKey, CacheStore};
use crate::config::Config;
use crate::error::EnrichError;
use serde::Serialize;
use std::sync::Arc;

pub const VERSE_NOT_FOUND: &str = "Verse not found";

/// Verse text (or a description of why there is none) for one reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseResult {
    pub content: String,
    pub reference: String,
}

impl VerseResult {
    fn from_passage(passage: &BiblePassage, requested: &str) -> Self {
        Self {
            content: passage.text().unwrap_or(VERSE_NOT_FOUND).to_string(),
            reference: passage.reference().unwrap_or(requested).to_string(),
        }
    }

    fn degraded(content: String, requested: &str) -> Self {
        Self {
            content,
            reference: requested.to_string(),
        }
    }
}

pub struct VerseResolver {
    client: BibleClient,
    cache: Arc<dyn CacheStore>,
}

impl VerseResolver {
    pub fn new(client: BibleClient, cache: Arc<dyn CacheStore>) -> Self {
        Self { client, cache }
    }

    pub fn from_config(config: &Config, client: reqwest::Client, cache: Arc<dyn CacheStore>) -> Self {
        Self::new(BibleClient::new(client, &config.endpoints.bible), cache)
    }

    /// Resolve one scripture reference. Only successful lookups are cached.
    pub async fn resolve(&self, reference: &str) -> VerseResult {
        let key = CacheKey::verse(reference);
        if let Some(cached) = self.cache.get::<BiblePassage>(&key).await {
            log::debug!("Using cached verse for: {}", reference);
            return VerseResult::from_passage(&cached, reference);
        }

        match self.client.lookup(reference).await {
            Ok(passage) => {
                self.cache.set(&key, &passage).await;
                let result = VerseResult::from_passage(&passage, reference);
                log::debug!(
                    "Verse response for {}: {:.50}",
                    result.reference,
                    result.content
                );
                result
            }
            Err(EnrichError::HttpStatus(status)) => {
                log::error!("Bible API error for {}: {}", reference, status);
                VerseResult::degraded(
                    format!("Error fetching verse: {}", status.as_u16()),
                    reference,
                )
            }
            Err(e) => {
                log::error!("Failed to fetch verse {}: {}", reference, e);
                VerseResult::degraded(format!("Error: {}", e), reference)
            }
        }
    }
}

#[cfg(test)]
#[path = "verse_tests.rs"]
mod tests;

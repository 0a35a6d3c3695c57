//! Icon resolution: cache, then Noun Project, then image search
//!
//! A symbol may name several alternatives (`"dove or olive branch"`). Each
//! alternative is resolved on its own and the URLs that were found are joined
//! back together with the same separator.

use crate::api::{upgrade_thumbnail, ImageSearchClient, NounProjectClient};
use crate::cache::{CacheKey, CacheStore};
use crate::config::Config;
use crate::signer::RequestSigner;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Separator between alternative search terms, and between resolved URLs
pub const TERM_SEPARATOR: &str = " or ";

/// Cache payload for a resolved icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedIcon {
    pub thumbnail_url: String,
}

pub struct IconResolver {
    primary: NounProjectClient,
    fallback: ImageSearchClient,
    cache: Arc<dyn CacheStore>,
}

impl IconResolver {
    pub fn new(
        primary: NounProjectClient,
        fallback: ImageSearchClient,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            primary,
            fallback,
            cache,
        }
    }

    /// Wire both providers from the run configuration
    pub fn from_config(config: &Config, client: reqwest::Client, cache: Arc<dyn CacheStore>) -> Self {
        let creds = &config.credentials;
        let signer = RequestSigner::new(&creds.noun_project_key, &creds.noun_project_secret);
        let primary = NounProjectClient::new(client.clone(), signer, &config.endpoints.noun_project);
        let fallback =
            ImageSearchClient::new(client, &creds.rapid_api_key, &config.endpoints.image_search);
        Self::new(primary, fallback, cache)
    }

    /// Resolve every alternative in `terms`.
    ///
    /// Returns `None` when no alternative resolved.
    pub async fn resolve(&self, terms: &str) -> Option<String> {
        let lookups = terms.split(TERM_SEPARATOR).map(|term| self.resolve_term(term));
        let resolved: Vec<String> = join_all(lookups).await.into_iter().flatten().collect();

        if resolved.is_empty() {
            None
        } else {
            Some(resolved.join(TERM_SEPARATOR))
        }
    }

    /// Resolve a single search term
    pub async fn resolve_term(&self, term: &str) -> Option<String> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let key = CacheKey::icon(term);
        if let Some(cached) = self.cache.get::<CachedIcon>(&key).await {
            log::debug!("Using cached icon for: {}", term);
            return Some(cached.thumbnail_url);
        }

        let thumbnail_url = match self.primary.search(term).await {
            Ok(response) => match response.best_match() {
                Some(url) => upgrade_thumbnail(url),
                None => {
                    log::debug!("No Noun Project icon for {}, trying image search", term);
                    self.search_fallback(term).await?
                }
            },
            Err(e) => {
                log::warn!("Noun Project lookup failed for {}: {}", term, e);
                return None;
            }
        };

        let entry = CachedIcon { thumbnail_url };
        self.cache.set(&key, &entry).await;
        Some(entry.thumbnail_url)
    }

    async fn search_fallback(&self, term: &str) -> Option<String> {
        match self.fallback.search(term).await {
            Ok(response) => match response.first_url() {
                Some(url) => Some(url.to_string()),
                None => {
                    log::error!(
                        "Image search returned no result for {}: {}",
                        term,
                        response.message.as_deref().unwrap_or("no message")
                    );
                    log::debug!("No icon found for {}", term);
                    None
                }
            },
            Err(e) => {
                log::error!("Image search failed for {}: {}", term, e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "icon_tests.rs"]
mod tests;

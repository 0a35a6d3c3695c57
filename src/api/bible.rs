//! bible-api.com client for verse text

use crate::error::{EnrichError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Passage lookup response.
///
/// Fields not modelled here are kept in `extra` so a cached passage is the
/// full provider payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiblePassage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Vec<BibleVerse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibleVerse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BiblePassage {
    /// Passage text, treating an empty string as missing
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Normalized reference, treating an empty string as missing
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }
}

pub struct BibleClient {
    client: Client,
    base_url: String,
}

impl BibleClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Look up a passage; non-2xx responses become [`EnrichError::HttpStatus`]
    pub async fn lookup(&self, reference: &str) -> Result<BiblePassage> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(reference)
        );

        log::debug!("Fetching verse: {}", reference);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(EnrichError::HttpStatus(response.status()));
        }

        Ok(response.json::<BiblePassage>().await?)
    }
}

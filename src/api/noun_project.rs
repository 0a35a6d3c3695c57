//! Noun Project icon search (primary icon provider)
//!
//! Requests are signed with OAuth 1.0a; see [`crate::signer`].

use crate::error::{EnrichError, Result};
use crate::signer::RequestSigner;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;

const THUMBNAIL_SIZE: &str = "_200.";
const UPGRADED_SIZE: &str = "_512.";

/// Icon search response
#[derive(Debug, Deserialize)]
pub struct IconSearchResponse {
    #[serde(default)]
    pub icons: Option<Vec<NounIcon>>,
}

#[derive(Debug, Deserialize)]
pub struct NounIcon {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl IconSearchResponse {
    /// Thumbnail URL of the first icon, if any
    pub fn best_match(&self) -> Option<&str> {
        self.icons
            .as_ref()?
            .first()?
            .thumbnail_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// Swap the last `_200.` size token for `_512.` to get the larger rendition
pub fn upgrade_thumbnail(url: &str) -> String {
    match url.rfind(THUMBNAIL_SIZE) {
        Some(idx) => format!(
            "{}{}{}",
            &url[..idx],
            UPGRADED_SIZE,
            &url[idx + THUMBNAIL_SIZE.len()..]
        ),
        None => url.to_string(),
    }
}

pub struct NounProjectClient {
    client: Client,
    signer: RequestSigner,
    base_url: String,
}

impl NounProjectClient {
    pub fn new(client: Client, signer: RequestSigner, base_url: impl Into<String>) -> Self {
        Self {
            client,
            signer,
            base_url: base_url.into(),
        }
    }

    /// Search for the single best icon matching `term`
    pub async fn search(&self, term: &str) -> Result<IconSearchResponse> {
        let url = format!(
            "{}?query={}&limit=1",
            self.base_url,
            urlencoding::encode(term)
        );
        let authorization = self.signer.authorize("GET", &url)?;

        log::debug!("Fetching icon from Noun Project: {}", term);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::HttpStatus(response.status()));
        }

        Ok(response.json::<IconSearchResponse>().await?)
    }
}

//! Google image search via RapidAPI (fallback icon provider)

use crate::error::{EnrichError, Result};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ImageSearchRequest<'a> {
    keyword: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<ImageResult>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl ImageSearchResponse {
    /// URL of the first result, only when the provider reports success
    pub fn first_url(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.data
            .as_ref()?
            .first()?
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

pub struct ImageSearchClient {
    client: Client,
    api_key: String,
    url: String,
}

impl ImageSearchClient {
    pub fn new(client: Client, api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: url.into(),
        }
    }

    pub async fn search(&self, keyword: &str) -> Result<ImageSearchResponse> {
        let host = Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| EnrichError::InvalidUrl {
                url: self.url.clone(),
                reason: "no host".to_string(),
            })?;

        log::debug!("Fetching fallback image for: {}", keyword);

        let response = self
            .client
            .post(&self.url)
            .header("x-rapidapi-host", host)
            .header("x-rapidapi-key", &self.api_key)
            .json(&ImageSearchRequest { keyword })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::HttpStatus(response.status()));
        }

        Ok(response.json::<ImageSearchResponse>().await?)
    }
}

//! Run configuration
//!
//! Built once at startup and passed by reference to every component. Secrets
//! are validated here so a missing key aborts the run before any I/O.

use crate::error::{EnrichError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_NOUN_PROJECT_URL: &str = "https://api.thenounproject.com/v2/icon";
pub const DEFAULT_IMAGE_SEARCH_URL: &str =
    "https://google-image-grab-cheap-json.p.rapidapi.com/imgrabgooglev2";
pub const DEFAULT_BIBLE_API_URL: &str = "https://bible-api.com";
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// API secrets required at startup
#[derive(Clone)]
pub struct Credentials {
    pub noun_project_key: String,
    pub noun_project_secret: String,
    pub bible_api_key: String,
    pub rapid_api_key: String,
}

impl Credentials {
    /// Validate the four secrets, naming the first one that is missing or blank
    pub fn new(
        noun_project_key: Option<String>,
        noun_project_secret: Option<String>,
        bible_api_key: Option<String>,
        rapid_api_key: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            noun_project_key: require(noun_project_key, "NOUN_PROJECT_KEY")?,
            noun_project_secret: require(noun_project_secret, "NOUN_PROJECT_SECRET")?,
            bible_api_key: require(bible_api_key, "BIBLE_API_KEY")?,
            rapid_api_key: require(rapid_api_key, "RAPID_API_KEY")?,
        })
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(EnrichError::MissingConfig(name)),
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("noun_project_key", &"<redacted>")
            .field("noun_project_secret", &"<redacted>")
            .field("bible_api_key", &"<redacted>")
            .field("rapid_api_key", &"<redacted>")
            .finish()
    }
}

/// Provider base URLs
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub noun_project: String,
    pub image_search: String,
    pub bible: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            noun_project: DEFAULT_NOUN_PROJECT_URL.to_string(),
            image_search: DEFAULT_IMAGE_SEARCH_URL.to_string(),
            bible: DEFAULT_BIBLE_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    /// Directory holding one JSON file per cache entry
    pub cache_dir: PathBuf,
    /// Deadline for a single HTTP request; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Maximum rows resolved at once; `None` launches every row together
    pub max_concurrent_rows: Option<usize>,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            request_timeout: None,
            max_concurrent_rows: None,
        }
    }

    /// Shared HTTP client for every provider call in a run
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("card_enrich/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

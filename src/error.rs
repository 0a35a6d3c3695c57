//! Error types for card_enrich

use thiserror::Error;

/// Unified error type for card_enrich operations.
///
/// Only startup and input errors ever reach the caller of the binary; provider
/// errors are caught inside the resolvers and turned into degraded values.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Required configuration value was absent or blank
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Source file could not be parsed as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Source file header lacks a required column
    #[error("Source file is missing required column: {0}")]
    MissingColumn(&'static str),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Provider endpoint could not be parsed as a URL
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Request signature could not be computed
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Result alias for card_enrich operations
pub type Result<T> = std::result::Result<T, EnrichError>;

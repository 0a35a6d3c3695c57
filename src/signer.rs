//! OAuth 1.0a request signing for the Noun Project API
//!
//! One-legged flow: only the consumer key and secret are involved, there is no
//! token. Signatures are HMAC-SHA1 over the standard signature base string.

use crate::error::{EnrichError, Result};
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use sha1::Sha1;
use std::fmt;
use urlencoding::encode;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Produces `Authorization` header values for signed requests
#[derive(Clone)]
pub struct RequestSigner {
    consumer_key: String,
    consumer_secret: String,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

impl RequestSigner {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Sign a request with a fresh nonce and the current timestamp
    pub fn authorize(&self, method: &str, url: &str) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp();
        let nonce = generate_nonce();
        self.sign_with(method, url, timestamp, &nonce)
    }

    /// Sign a request with an explicit timestamp and nonce.
    ///
    /// Query parameters already present in `url` are part of the signature.
    pub fn sign_with(&self, method: &str, url: &str, timestamp: i64, nonce: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| EnrichError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let timestamp = timestamp.to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base = base_string(method, &parsed, &oauth_params);
        let signature = self.signature(&base)?;
        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort();

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", header))
    }

    fn signature(&self, base_string: &str) -> Result<String> {
        let signing_key = format!("{}&", encode(&self.consumer_secret));
        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .map_err(|e| EnrichError::Signing(e.to_string()))?;
        mac.update(base_string.as_bytes());
        Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&enc(base_url)&enc(sorted, encoded parameters)`
fn base_string(method: &str, url: &Url, oauth_params: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k).into_owned(), encode(&v).into_owned()))
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned())),
        )
        .collect();
    params.sort();

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(&base_url(url)),
        encode(&param_string)
    )
}

/// Scheme, host, non-default port and path; no query or fragment
fn base_url(url: &Url) -> String {
    let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    base.push_str(url.path());
    base
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

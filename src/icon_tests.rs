//! Tests for icon resolution against mocked providers

use std::sync::Arc;

use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::{ImageSearchClient, NounProjectClient};
use crate::cache::{CacheKey, CacheStore, MemoryCache};
use crate::icon::{CachedIcon, IconResolver};
use crate::signer::RequestSigner;

fn resolver_with_mock(mock_uri: &str, cache: Arc<MemoryCache>) -> IconResolver {
    let client = reqwest::Client::new();
    let primary = NounProjectClient::new(
        client.clone(),
        RequestSigner::new("test_key", "test_secret"),
        format!("{}/v2/icon", mock_uri),
    );
    let fallback = ImageSearchClient::new(client, "rapid_key", format!("{}/imgrabgooglev2", mock_uri));
    IconResolver::new(primary, fallback, cache)
}

async fn mock_noun_icon(mock_server: &MockServer, term: &str, thumbnail: &str) {
    Mock::given(method("GET"))
        .and(path("/v2/icon"))
        .and(query_param("query", term))
        .and(query_param("limit", "1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "icons": [{ "thumbnail_url": thumbnail }]
        })))
        .mount(mock_server)
        .await;
}

async fn mock_noun_miss(mock_server: &MockServer, term: &str) {
    Mock::given(method("GET"))
        .and(path("/v2/icon"))
        .and(query_param("query", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "icons": []
        })))
        .mount(mock_server)
        .await;
}

// ── primary provider ─────────────────────────────────────────────────

#[tokio::test]
async fn primary_hit_upgrades_thumbnail_and_caches() {
    let mock_server = MockServer::start().await;
    let cache = Arc::new(MemoryCache::new());
    let resolver = resolver_with_mock(&mock_server.uri(), cache.clone());

    mock_noun_icon(&mock_server, "dove", "https://static.example/dove_200.png").await;

    let url = resolver.resolve("dove").await;
    assert_eq!(url.as_deref(), Some("https://static.example/dove_512.png"));

    let store: Arc<dyn CacheStore> = cache;
    let cached: CachedIcon = store.get(&CacheKey::icon("dove")).await.unwrap();
    assert_eq!(cached.thumbnail_url, "https://static.example/dove_512.png");
}

#[tokio::test]
async fn primary_request_is_oauth_signed() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    Mock::given(method("GET"))
        .and(path("/v2/icon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "icons": [{ "thumbnail_url": "https://static.example/lamp_200.png" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    resolver.resolve("lamp").await;

    let requests = mock_server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_consumer_key=\"test_key\""));
    assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(auth.contains("oauth_signature=\""));
}

// ── read-through cache ───────────────────────────────────────────────

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    Mock::given(method("GET"))
        .and(path("/v2/icon"))
        .and(query_param("query", "dove"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "icons": [{ "thumbnail_url": "https://static.example/dove_200.png" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let first = resolver.resolve("dove").await;
    let second = resolver.resolve("dove").await;

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn cache_key_ignores_case() {
    let mock_server = MockServer::start().await;
    let cache = Arc::new(MemoryCache::new());
    let store: Arc<dyn CacheStore> = cache.clone();
    store
        .set(
            &CacheKey::icon("dove"),
            &CachedIcon {
                thumbnail_url: "https://cached/dove_512.png".to_string(),
            },
        )
        .await;
    let resolver = resolver_with_mock(&mock_server.uri(), cache);

    let url = resolver.resolve("Dove").await;

    assert_eq!(url.as_deref(), Some("https://cached/dove_512.png"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ── fallback provider ────────────────────────────────────────────────

#[tokio::test]
async fn primary_miss_falls_back_exactly_once() {
    let mock_server = MockServer::start().await;
    let cache = Arc::new(MemoryCache::new());
    let resolver = resolver_with_mock(&mock_server.uri(), cache.clone());

    mock_noun_miss(&mock_server, "mustard seed").await;

    Mock::given(method("POST"))
        .and(path("/imgrabgooglev2"))
        .and(header("x-rapidapi-key", "rapid_key"))
        .and(header("x-rapidapi-host", "127.0.0.1"))
        .and(body_json(serde_json::json!({ "keyword": "mustard seed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{
                "url": "https://images.example/mustard.jpg",
                "thumbnail": "https://images.example/mustard_t.jpg",
                "title": "Mustard seed",
                "width": 800,
                "height": 600
            }],
            "message": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = resolver.resolve("mustard seed").await;

    assert_eq!(url.as_deref(), Some("https://images.example/mustard.jpg"));
    assert!(cache.contains(&CacheKey::icon("mustard seed")));
}

#[tokio::test]
async fn both_providers_missing_is_none_and_not_cached() {
    let mock_server = MockServer::start().await;
    let cache = Arc::new(MemoryCache::new());
    let resolver = resolver_with_mock(&mock_server.uri(), cache.clone());

    mock_noun_miss(&mock_server, "nothing").await;

    Mock::given(method("POST"))
        .and(path("/imgrabgooglev2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "No images found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_eq!(resolver.resolve("nothing").await, None);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn fallback_transport_error_is_none() {
    let mock_server = MockServer::start().await;
    let cache = Arc::new(MemoryCache::new());
    let client = reqwest::Client::new();
    let primary = NounProjectClient::new(
        client.clone(),
        RequestSigner::new("test_key", "test_secret"),
        format!("{}/v2/icon", mock_server.uri()),
    );
    // Nothing listens on port 9 (discard) on the loopback interface
    let fallback = ImageSearchClient::new(client, "rapid_key", "http://127.0.0.1:9/imgrabgooglev2");
    let resolver = IconResolver::new(primary, fallback, cache.clone());

    mock_noun_miss(&mock_server, "crown").await;

    assert_eq!(resolver.resolve("crown").await, None);
    assert!(cache.is_empty());
}

// Any non-2xx from the icon search ends the term, even a quota error whose
// JSON body has no `icons`. Only a successful empty search falls back.
#[tokio::test]
async fn primary_http_error_skips_fallback() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    Mock::given(method("GET"))
        .and(path("/v2/icon"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/imgrabgooglev2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    assert_eq!(resolver.resolve("dove").await, None);
}

// ── multiple terms ───────────────────────────────────────────────────

#[tokio::test]
async fn unresolved_terms_are_dropped_from_combination() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    mock_noun_icon(&mock_server, "apple", "https://static.example/apple_200.png").await;
    mock_noun_miss(&mock_server, "banana").await;

    Mock::given(method("POST"))
        .and(path("/imgrabgooglev2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [],
            "message": ""
        })))
        .mount(&mock_server)
        .await;

    let url = resolver.resolve("apple or banana").await;
    assert_eq!(url.as_deref(), Some("https://static.example/apple_512.png"));
}

#[tokio::test]
async fn resolved_terms_keep_input_order() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    mock_noun_icon(&mock_server, "lamp", "https://static.example/lamp_200.png").await;
    mock_noun_icon(&mock_server, "oil", "https://static.example/oil_200.png").await;

    let url = resolver.resolve("oil or lamp").await;
    assert_eq!(
        url.as_deref(),
        Some("https://static.example/oil_512.png or https://static.example/lamp_512.png")
    );
}

#[tokio::test]
async fn blank_symbol_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let resolver = resolver_with_mock(&mock_server.uri(), Arc::new(MemoryCache::new()));

    assert_eq!(resolver.resolve("").await, None);
    assert_eq!(resolver.resolve("   ").await, None);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

//! Browser integration tests.
//!
//! Run with `wasm-pack test --headless --firefox` (or `--chrome`).

#![cfg(target_arch = "wasm32")]

use ephesus::config::{routes, theme};
use ephesus::core::{ApiClient, BlobStore, ModelCache, QueryCache, RawResponse, Router, ThemeStore};
use ephesus::core::{BrowserTheme, Transport};
use ephesus::models::{QueryKey, Route, Theme};
use ephesus::utils::{BrowserTransport, CacheStorageStore, SessionCache, dom};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn model_cache_round_trip() {
    let store = CacheStorageStore::new("coin-models-test");
    let cache = ModelCache::new(store.clone());
    let payload: Vec<u8> = (0..=255u8).collect();

    cache.cache_model("/api/models/round-trip.glb", &payload).await;
    assert_eq!(
        cache.get_cached_model("/api/models/round-trip.glb").await,
        Some(payload)
    );
    assert_eq!(cache.get_cached_model("/api/models/absent.glb").await, None);

    cache.clear_model_cache().await;
    assert_eq!(store.read("/api/models/round-trip.glb").await, Ok(None));
}

#[wasm_bindgen_test]
fn theme_is_persisted_and_reflected() {
    let store = ThemeStore::new(BrowserTheme);
    store.init();
    let original = store.get();

    store.toggle();
    let flipped = store.get();
    assert_eq!(flipped, original.toggled());
    assert_eq!(
        dom::root_attribute(theme::DOCUMENT_ATTRIBUTE).as_deref(),
        Some(flipped.as_str())
    );
    let saved = dom::local_storage()
        .and_then(|s| s.get_item(theme::STORAGE_KEY).ok().flatten());
    assert_eq!(saved.as_deref(), Some(flipped.as_str()));

    store.toggle();
    assert_eq!(store.get(), original);

    // A fresh store picks the persisted value up.
    store.set_theme(Theme::Dark);
    let reloaded = ThemeStore::new(BrowserTheme);
    reloaded.init();
    assert_eq!(reloaded.get(), Theme::Dark);
}

#[wasm_bindgen_test]
fn router_reads_location_hash() {
    dom::set_hash("/coin/aureus-3");
    let router = Router::new();
    router.init();
    assert_eq!(router.current(), Route::coin("aureus-3"));
    assert_eq!(router.current_path().get(), routes::COIN_PATTERN);
}

#[wasm_bindgen_test]
fn session_cache_round_trip() {
    let key = QueryKey::Coin("test".into());
    SessionCache.put(&key, r#"{"id":"test"}"#).unwrap();
    assert_eq!(SessionCache.get(&key).as_deref(), Some(r#"{"id":"test"}"#));
    SessionCache.remove(&key).unwrap();
    assert_eq!(SessionCache.get(&key), None);
}

#[wasm_bindgen_test]
async fn unreachable_host_is_a_network_error() {
    let response: Result<RawResponse, _> = BrowserTransport.get("http://127.0.0.1:1/api/coins").await;
    assert!(response.is_err());

    let api = ApiClient::new("http://127.0.0.1:1/api", BrowserTransport);
    assert!(api.fetch_coins().await.is_err());
}

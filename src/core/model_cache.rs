//! Best-effort cache for binary 3D models.
//!
//! The cache is an optimization, never a source of truth: every storage
//! failure is logged and swallowed, and callers only ever see a hit or a miss.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::error::CacheError;

/// Byte storage keyed by source URL.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    async fn read(&self, url: &str) -> Result<Option<Vec<u8>>, CacheError>;
    async fn write(&self, url: &str, data: &[u8]) -> Result<(), CacheError>;
    /// Remove every entry in the store's namespace.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// In-process [`BlobStore`], used outside the browser and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    async fn read(&self, url: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.lock().map_err(|e| CacheError::ReadFailed(e.to_string()))?;
        Ok(entries.get(url).cloned())
    }

    async fn write(&self, url: &str, data: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|e| CacheError::WriteFailed(e.to_string()))?;
        entries.insert(url.to_string(), data.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|e| CacheError::DeleteFailed(e.to_string()))?;
        entries.clear();
        Ok(())
    }
}

/// Never-failing facade over a [`BlobStore`].
#[derive(Clone, Debug, Default)]
pub struct ModelCache<S> {
    store: S,
}

impl<S: BlobStore> ModelCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Cached bytes for `url`, or `None` on miss or storage failure.
    pub async fn get_cached_model(&self, url: &str) -> Option<Vec<u8>> {
        match self.store.read(url).await {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Cache read failed: {}", e);
                None
            }
        }
    }

    /// Store `data` under `url`; failures are only logged.
    pub async fn cache_model(&self, url: &str, data: &[u8]) {
        if let Err(e) = self.store.write(url, data).await {
            log::warn!("Cache write failed: {}", e);
        }
    }

    /// Evict the whole model namespace; failures are only logged.
    pub async fn clear_model_cache(&self) {
        if let Err(e) = self.store.clear().await {
            log::warn!("Cache clear failed: {}", e);
        }
    }

    /// Cache-first load: return a hit, otherwise run `fetch` and cache its
    /// bytes on success. Fetch errors pass through untouched.
    pub async fn load_model<F, Fut, E>(&self, url: &str, fetch: F) -> Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
    {
        if let Some(bytes) = self.get_cached_model(url).await {
            log::debug!("model cache hit: {}", url);
            return Ok(bytes);
        }

        let bytes = fetch().await?;
        self.cache_model(url, &bytes).await;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Store whose every operation fails.
    struct BrokenStore;

    impl BlobStore for BrokenStore {
        async fn read(&self, _url: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::StorageUnavailable)
        }

        async fn write(&self, _url: &str, _data: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::WriteFailed("quota exceeded".into()))
        }

        async fn clear(&self) -> Result<(), CacheError> {
            Err(CacheError::DeleteFailed("denied".into()))
        }
    }

    #[tokio::test]
    async fn test_round_trip_is_byte_identical() {
        let cache = ModelCache::new(MemoryBlobStore::new());
        let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

        cache.cache_model("/api/models/a.glb", &payload).await;
        assert_eq!(cache.get_cached_model("/api/models/a.glb").await, Some(payload));
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = ModelCache::new(MemoryBlobStore::new());
        assert_eq!(cache.get_cached_model("/api/models/none.glb").await, None);
    }

    #[tokio::test]
    async fn test_clear_evicts_everything() {
        let store = MemoryBlobStore::new();
        let cache = ModelCache::new(store.clone());
        cache.cache_model("/a", b"a").await;
        cache.cache_model("/b", b"b").await;
        assert_eq!(store.len(), 2);

        cache.clear_model_cache().await;
        assert!(store.is_empty());
        assert_eq!(cache.get_cached_model("/a").await, None);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let cache = ModelCache::new(BrokenStore);
        assert_eq!(cache.get_cached_model("/a").await, None);
        cache.cache_model("/a", b"x").await;
        cache.clear_model_cache().await;

        let loaded: Result<Vec<u8>, ()> = cache.load_model("/a", || async { Ok(vec![7]) }).await;
        assert_eq!(loaded, Ok(vec![7]));
    }

    #[tokio::test]
    async fn test_load_model_fetches_once() {
        let cache = ModelCache::new(MemoryBlobStore::new());
        let fetches = Cell::new(0);

        for _ in 0..3 {
            let bytes: Result<Vec<u8>, String> = cache
                .load_model("/api/models/c.glb", || async {
                    fetches.set(fetches.get() + 1);
                    Ok(vec![1, 2, 3])
                })
                .await;
            assert_eq!(bytes, Ok(vec![1, 2, 3]));
        }
        assert_eq!(fetches.get(), 1);
    }

    #[tokio::test]
    async fn test_load_model_does_not_cache_errors() {
        let cache = ModelCache::new(MemoryBlobStore::new());
        let failed: Result<Vec<u8>, &str> = cache.load_model("/x", || async { Err("404") }).await;
        assert_eq!(failed, Err("404"));
        assert_eq!(cache.get_cached_model("/x").await, None);
    }
}

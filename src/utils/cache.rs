//! Session-scoped caching of API responses.
//!
//! Entries live in sessionStorage under `query.<key>` and disappear when the
//! tab is closed, so a reload within the tab skips redundant fetches while a
//! new visit always sees fresh data.

use crate::config::cache::QUERY_PREFIX;
use crate::core::api::QueryCache;
use crate::core::error::{CacheError, describe_js};
use crate::models::QueryKey;

use super::dom;

/// [`QueryCache`] backed by sessionStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionCache;

fn storage_key(key: &QueryKey) -> String {
    format!("{}{}", QUERY_PREFIX, key.cache_key())
}

impl QueryCache for SessionCache {
    fn get(&self, key: &QueryKey) -> Option<String> {
        let storage = dom::session_storage()?;
        storage.get_item(&storage_key(key)).ok()?
    }

    fn put(&self, key: &QueryKey, json: &str) -> Result<(), CacheError> {
        let storage = dom::session_storage().ok_or(CacheError::StorageUnavailable)?;
        storage
            .set_item(&storage_key(key), json)
            .map_err(|e| CacheError::WriteFailed(describe_js(&e)))
    }

    fn remove(&self, key: &QueryKey) -> Result<(), CacheError> {
        let storage = dom::session_storage().ok_or(CacheError::StorageUnavailable)?;
        storage
            .remove_item(&storage_key(key))
            .map_err(|e| CacheError::DeleteFailed(describe_js(&e)))
    }
}

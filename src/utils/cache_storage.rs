//! Cache Storage backed [`BlobStore`].

use js_sys::{Object, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, CacheStorage, Headers, Response, ResponseInit};

use crate::config::cache::{MODEL_CACHE_NAME, MODEL_CONTENT_TYPE};
use crate::core::error::{CacheError, describe_js};
use crate::core::model_cache::BlobStore;

use super::dom;

/// One named Cache Storage namespace, e.g. `coin-models-v1`.
#[derive(Clone, Debug)]
pub struct CacheStorageStore {
    name: String,
}

impl CacheStorageStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn caches() -> Result<CacheStorage, CacheError> {
        dom::window()
            .ok_or(CacheError::StorageUnavailable)?
            .caches()
            .map_err(|_| CacheError::StorageUnavailable)
    }

    async fn open(&self) -> Result<Cache, CacheError> {
        let cache = await_promise(Self::caches()?.open(&self.name), CacheError::ReadFailed).await?;
        cache
            .dyn_into::<Cache>()
            .map_err(|_| CacheError::ReadFailed("open did not return a Cache".to_string()))
    }
}

impl Default for CacheStorageStore {
    fn default() -> Self {
        Self::new(MODEL_CACHE_NAME)
    }
}

async fn await_promise(
    promise: Promise,
    err: fn(String) -> CacheError,
) -> Result<wasm_bindgen::JsValue, CacheError> {
    JsFuture::from(promise).await.map_err(|e| err(describe_js(&e)))
}

impl BlobStore for CacheStorageStore {
    async fn read(&self, url: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let cache = self.open().await?;
        let hit = await_promise(cache.match_with_str(url), CacheError::ReadFailed).await?;
        if hit.is_undefined() || hit.is_null() {
            return Ok(None);
        }

        let response: Response = hit
            .dyn_into()
            .map_err(|_| CacheError::ReadFailed("match did not return a Response".to_string()))?;
        let buffer = response
            .array_buffer()
            .map_err(|e| CacheError::ReadFailed(describe_js(&e)))?;
        let buffer = await_promise(buffer, CacheError::ReadFailed).await?;
        Ok(Some(Uint8Array::new(&buffer).to_vec()))
    }

    async fn write(&self, url: &str, data: &[u8]) -> Result<(), CacheError> {
        let write_err = |e: wasm_bindgen::JsValue| CacheError::WriteFailed(describe_js(&e));

        let headers = Headers::new().map_err(write_err)?;
        headers
            .set("Content-Type", MODEL_CONTENT_TYPE)
            .map_err(write_err)?;
        headers
            .set("Content-Length", &data.len().to_string())
            .map_err(write_err)?;

        let init = ResponseInit::new();
        init.set_headers(&headers);
        let body: Object = Uint8Array::from(data).into();
        let response =
            Response::new_with_opt_buffer_source_and_init(Some(&body), &init).map_err(write_err)?;

        let cache = self.open().await?;
        await_promise(cache.put_with_str(url, &response), CacheError::WriteFailed).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        await_promise(Self::caches()?.delete(&self.name), CacheError::DeleteFailed).await?;
        Ok(())
    }
}

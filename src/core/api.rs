//! Coin catalog REST client.
//!
//! Two error policies coexist:
//! - fetches are fail-loud and return `Result<_, ApiError>`;
//! - uploads never fail and always resolve to an [`UploadResponse`].
//!
//! The client is generic over a [`Transport`] so the same logic runs against
//! the browser (`utils::fetch::BrowserTransport`) or an in-memory double.

use std::future::Future;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::core::error::{ApiError, CacheError};
use crate::models::{Coin, CoinMetadata, CoinSummary, QueryKey, UploadResponse};

/// Upload progress callback, called with a percentage in `0.0..=100.0`.
pub type ProgressFn = Box<dyn Fn(f64)>;

/// Status line and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn http_error(self, context: &'static str) -> ApiError {
        ApiError::Http {
            context,
            status: self.status,
            status_text: self.status_text,
        }
    }
}

/// Multipart body of `POST /coins`.
pub struct UploadForm<'a, F> {
    /// Binary model, sent as the `model` field.
    pub model: &'a F,
    /// JSON-encoded [`CoinMetadata`], sent as the `metadata` field.
    pub metadata: String,
}

/// HTTP plumbing used by [`ApiClient`].
///
/// A transport only reports transport-level failures as errors; any status
/// code, including 4xx/5xx, comes back as a [`RawResponse`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Handle to a binary file the transport can upload.
    type File;

    async fn get(&self, url: &str) -> Result<RawResponse, ApiError>;

    async fn post_multipart(
        &self,
        url: &str,
        form: UploadForm<'_, Self::File>,
        on_progress: Option<ProgressFn>,
    ) -> Result<RawResponse, ApiError>;
}

/// Raw-JSON store for query results, keyed by [`QueryKey`].
pub trait QueryCache: Send + Sync {
    fn get(&self, key: &QueryKey) -> Option<String>;
    fn put(&self, key: &QueryKey, json: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &QueryKey) -> Result<(), CacheError>;
}

/// Client for `/api/coins`.
pub struct ApiClient<T> {
    base: String,
    transport: T,
    cache: Option<Arc<dyn QueryCache>>,
}

impl<T: Clone> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            transport: self.transport.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base: impl Into<String>, transport: T) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            transport,
            cache: None,
        }
    }

    /// Enable query caching for the `*_cached` fetches.
    pub fn with_cache(mut self, cache: impl QueryCache + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /coins`.
    pub async fn fetch_coins(&self) -> Result<Vec<Coin>, ApiError> {
        let response = self.transport.get(&self.url("/coins")).await?;
        if !response.ok() {
            return Err(response.http_error("Failed to fetch coins"));
        }
        response.json()
    }

    /// `GET /coins/{id}`. A 404 becomes [`ApiError::NotFound`].
    pub async fn fetch_coin(&self, id: &str) -> Result<Coin, ApiError> {
        let response = self.transport.get(&self.url(&format!("/coins/{}", id))).await?;
        if !response.ok() {
            if response.status == 404 {
                return Err(ApiError::NotFound);
            }
            return Err(response.http_error("Failed to fetch coin"));
        }
        response.json()
    }

    /// [`fetch_coins`](Self::fetch_coins) through the query cache.
    pub async fn fetch_coins_cached(&self) -> Result<Vec<Coin>, ApiError> {
        self.cached(QueryKey::Coins, self.fetch_coins()).await
    }

    /// [`fetch_coin`](Self::fetch_coin) through the query cache.
    pub async fn fetch_coin_cached(&self, id: &str) -> Result<Coin, ApiError> {
        self.cached(QueryKey::Coin(id.to_string()), self.fetch_coin(id))
            .await
    }

    async fn cached<V>(
        &self,
        key: QueryKey,
        fetch: impl Future<Output = Result<V, ApiError>>,
    ) -> Result<V, ApiError>
    where
        V: Serialize + DeserializeOwned,
    {
        let Some(cache) = &self.cache else {
            return fetch.await;
        };

        if let Some(hit) = cache
            .get(&key)
            .and_then(|json| serde_json::from_str::<V>(&json).ok())
        {
            log::debug!("query cache hit: {}", key.cache_key());
            return Ok(hit);
        }

        let value = fetch.await?;
        let stored = serde_json::to_string(&value)
            .map_err(|e| CacheError::SerializationFailed(e.to_string()))
            .and_then(|json| cache.put(&key, &json));
        if let Err(e) = stored {
            log::warn!("Query cache write failed for {}: {}", key.cache_key(), e);
        }
        Ok(value)
    }

    /// Forget a cached query so the next cached fetch hits the network.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.remove(key)
        {
            log::warn!("Query cache invalidation failed for {}: {}", key.cache_key(), e);
        }
    }

    /// `POST /coins` with a model file and its metadata.
    ///
    /// Never fails; every outcome is reported through the returned
    /// [`UploadResponse`]. A successful upload invalidates the cached coin list.
    pub async fn upload_coin(
        &self,
        file: &T::File,
        metadata: &CoinMetadata,
        on_progress: Option<ProgressFn>,
    ) -> UploadResponse {
        let metadata = match serde_json::to_string(metadata) {
            Ok(json) => json,
            Err(e) => return UploadResponse::failed(format!("Invalid metadata: {}", e)),
        };
        let form = UploadForm {
            model: file,
            metadata,
        };

        let outcome = match self
            .transport
            .post_multipart(&self.url("/coins"), form, on_progress)
            .await
        {
            Ok(response) => interpret_upload(&response),
            Err(e) => {
                log::warn!("Upload request failed: {}", e);
                UploadResponse::failed("Network error")
            }
        };

        if outcome.success {
            self.invalidate(&QueryKey::Coins);
        }
        outcome
    }

    /// `GET /health`; `true` when the service answers 2xx.
    pub async fn health(&self) -> Result<bool, ApiError> {
        Ok(self.transport.get(&self.url("/health")).await?.ok())
    }

    /// Download a binary model from its `model_url`.
    pub async fn fetch_model(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.transport.get(url).await?;
        if !response.ok() {
            return Err(response.http_error("Failed to fetch model"));
        }
        Ok(response.body)
    }
}

/// Map an upload response to its outcome.
///
/// The body must be JSON regardless of status.
fn interpret_upload(response: &RawResponse) -> UploadResponse {
    let Ok(body) = serde_json::from_slice::<Value>(&response.body) else {
        return UploadResponse::failed("Invalid server response");
    };

    // Any JSON body on 2xx is a success; `coin` is filled when it is a summary.
    if response.ok() {
        return UploadResponse {
            success: true,
            coin: serde_json::from_value::<CoinSummary>(body).ok(),
            error: None,
        };
    }

    let error = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .unwrap_or("Upload failed");
    UploadResponse::failed(error)
}

//! Custom error types for the application.
//!
//! - [`ApiError`] - coin catalog requests (fail-loud paths)
//! - [`CacheError`] - Cache Storage and sessionStorage operations, only ever
//!   logged by best-effort callers

use thiserror::Error;

/// Errors raised by the coin catalog API client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Browser window not available.
    #[error("Browser window not available")]
    NoWindow,
    /// Request could not be built or sent.
    #[error("Failed to create request: {0}")]
    RequestCreationFailed(String),
    /// Transport-level failure (offline, CORS, aborted).
    #[error("Network error: {0}")]
    Network(String),
    /// Requested coin does not exist (HTTP 404).
    #[error("Coin not found")]
    NotFound,
    /// Non-2xx response.
    #[error("{context}: {status_text}")]
    Http {
        /// What the request was doing, e.g. "Failed to fetch coins".
        context: &'static str,
        status: u16,
        status_text: String,
    },
    /// Response body could not be read or decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from browser-side caches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    /// Storage API not available in this context.
    #[error("storage not available")]
    StorageUnavailable,
    /// Failed to serialize data.
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
    /// Failed to read an entry.
    #[error("read failed: {0}")]
    ReadFailed(String),
    /// Failed to write an entry.
    #[error("write failed: {0}")]
    WriteFailed(String),
    /// Failed to delete the namespace.
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}

/// Render a thrown JavaScript value for error messages.
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

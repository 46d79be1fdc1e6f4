//! Browser glue.
//!
//! Provides:
//! - [`dom`] - window, storage, and location helpers
//! - [`BrowserTransport`] - Fetch/XHR implementation of the API transport
//! - [`CacheStorageStore`] - Cache Storage implementation of the model store
//! - [`SessionCache`] - sessionStorage query cache
//! - [`logging`] - `log` backend writing to the console

mod cache;
mod cache_storage;
pub mod dom;
mod fetch;
pub mod logging;

pub use cache::SessionCache;
pub use cache_storage::CacheStorageStore;
pub use fetch::BrowserTransport;

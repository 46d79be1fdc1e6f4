//! Core client logic.
//!
//! This module provides:
//! - [`ApiClient`] REST access to the coin catalog
//! - [`ModelCache`] best-effort binary model caching
//! - [`Router`] hash routing and link interception
//! - [`Store`] observable state, and the [`ThemeStore`] / [`ViewerStore`] built on it

pub mod api;
pub mod error;
pub mod model_cache;
pub mod router;
pub mod store;
pub mod theme;
pub mod viewer;

pub use api::{ApiClient, ProgressFn, QueryCache, RawResponse, Transport, UploadForm};
pub use error::{ApiError, CacheError};
pub use model_cache::{BlobStore, MemoryBlobStore, ModelCache};
pub use router::{LinkAction, Router, classify_link};
pub use store::{Store, Subscription};
pub use theme::{BrowserTheme, ThemeEnvironment, ThemeStore};
pub use viewer::ViewerStore;

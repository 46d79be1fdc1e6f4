//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Coin`], [`CoinMetadata`], [`UploadResponse`] - Coin catalog records
//! - [`Route`] - Hash-based navigation
//! - [`Theme`] - Light/dark preference
//! - [`ViewerState`], [`EnvironmentPreset`] - 3D viewer controls

mod coin;
mod route;
mod theme;
mod viewer;

pub use coin::{Coin, CoinMetadata, CoinSummary, QueryKey, UploadResponse};
pub use route::Route;
pub use theme::Theme;
pub use viewer::{EnvironmentPreset, ViewerState};

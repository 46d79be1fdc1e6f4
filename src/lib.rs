//! Client support layer for the Ephesus coin viewer.
//!
//! - [`core`] - API client, model cache, router, and observable stores
//! - [`models`] - Coin catalog, route, theme, and viewer types
//! - [`utils`] - Browser implementations (Fetch/XHR, Cache Storage, storage, console)
//! - [`components`], [`app`] - Leptos UI wiring the above together

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use app::{App, AppContext};

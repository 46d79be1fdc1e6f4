//! UI components built with Leptos.
//!
//! - [`router`] - Route switch (main entry point)
//! - [`header`] - Title bar with navigation and theme toggle
//! - [`coin_list`] - Catalog overview
//! - [`coin_detail`] - Single coin with model loading and viewer controls
//! - [`upload`] - Model upload form

pub mod coin_detail;
pub mod coin_list;
pub mod header;
pub mod router;
pub mod upload;

pub use header::Header;
pub use router::AppRouter;

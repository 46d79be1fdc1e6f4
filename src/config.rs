//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "Ephesus";

// =============================================================================
// Network Configuration
// =============================================================================

/// Base path of the coin catalog REST API.
pub const API_BASE: &str = "/api";

/// Multipart form field names for coin uploads.
pub mod upload_fields {
    /// Binary model file field.
    pub const MODEL: &str = "model";
    /// JSON-encoded `CoinMetadata` field.
    pub const METADATA: &str = "metadata";
}

// =============================================================================
// Cache Configuration
// =============================================================================

/// Cache Storage and sessionStorage configuration.
pub mod cache {
    /// Cache Storage namespace for binary models.
    ///
    /// Bumping the version suffix orphans every entry written under the old name.
    pub const MODEL_CACHE_NAME: &str = "coin-models-v1";

    /// Content type declared on cached model responses.
    pub const MODEL_CONTENT_TYPE: &str = "model/gltf-binary";

    /// Prefix for API responses kept in sessionStorage.
    pub const QUERY_PREFIX: &str = "query.";
}

// =============================================================================
// Theme Configuration
// =============================================================================

/// Theme persistence and reflection.
pub mod theme {
    /// localStorage key holding the theme preference.
    pub const STORAGE_KEY: &str = "theme";

    /// Attribute set on `<html>` for styling.
    pub const DOCUMENT_ATTRIBUTE: &str = "data-theme";

    /// Media query used as the OS-level dark mode hint.
    pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
}

// =============================================================================
// Routing Configuration
// =============================================================================

/// Route patterns.
pub mod routes {
    /// Root route.
    pub const ROOT: &str = "/";
    /// Literal prefix of coin detail routes.
    pub const COIN_PREFIX: &str = "/coin/";
    /// Normalized pattern for coin detail routes.
    pub const COIN_PATTERN: &str = "/coin/:id";
    /// Upload page route.
    pub const UPLOAD: &str = "/upload";
}

// =============================================================================
// Logging
// =============================================================================

/// Maximum log level forwarded to the browser console.
pub const LOG_LEVEL: log::LevelFilter = if cfg!(debug_assertions) {
    log::LevelFilter::Debug
} else {
    log::LevelFilter::Warn
};

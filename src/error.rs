//! Error types for storage access and configuration loading.

/// A failed `localStorage` access.
///
/// The controller logs these and carries on as if nothing was stored; they
/// never reach callers of the public API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled, blocked by privacy settings, or missing.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// `getItem` threw.
    #[error("failed to read theme preference: {0}")]
    Read(String),
    /// `setItem` threw (quota exceeded, private mode).
    #[error("failed to save theme preference: {0}")]
    Write(String),
    /// `removeItem` threw.
    #[error("failed to clear theme preference: {0}")]
    Remove(String),
}

/// Error returned when loading a [`ThemeConfig`](crate::config::ThemeConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid theme config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A required string field was present but empty.
    #[error("theme config field `{0}` must not be empty")]
    EmptyField(&'static str),
}

//! Error types for plan and settings loading

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while reading settings or plan files
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Plan file with an extension we cannot read
    #[error("Unsupported plan format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),
}

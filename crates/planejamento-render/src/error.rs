//! Error types for rendering and capture

use thiserror::Error;

/// Result type for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while capturing a rendering surface
#[derive(Error, Debug)]
pub enum RenderError {
    /// The surface markup could not be parsed
    #[error("SVG parsing failed: {0}")]
    InvalidSvg(String),

    /// Rasterization failed
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Encoding(String),
}

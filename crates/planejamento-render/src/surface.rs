//! Render target abstraction
//!
//! A render target is whatever holds the laid-out pages: the built-in SVG
//! surface, or any other backend able to produce a raster capture.

use async_trait::async_trait;

use crate::error::RenderResult;

/// Whether the target's deferred assets have finished loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// All assets are loaded; capture can start
    Ready,
    /// The target cannot tell; callers fall back to a fixed settle delay
    Unsupported,
}

/// Options for a raster capture
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Device pixels per surface pixel
    pub scale: f32,
    /// Background color (CSS hex or "white")
    pub background: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: "#ffffff".to_string(),
        }
    }
}

impl CaptureOptions {
    /// Set scale factor
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// PNG-encoded capture of a render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// PNG bytes
    pub png: Vec<u8>,
    /// Width in device pixels
    pub width: u32,
    /// Height in device pixels
    pub height: u32,
}

/// Something the export flow can capture.
///
/// Implementors must be `Send + Sync` so captures can run inside async
/// export tasks.
#[async_trait]
pub trait RenderTarget: Send + Sync {
    /// Human-readable name of this target
    fn name(&self) -> &'static str;

    /// Wait until deferred assets (images) are loaded.
    ///
    /// The default reports [`Readiness::Unsupported`], which makes the
    /// export flow sleep for its fixed settle interval instead.
    async fn assets_ready(&self) -> Readiness {
        Readiness::Unsupported
    }

    /// Capture the target as a raster image
    async fn capture(&self, options: &CaptureOptions) -> RenderResult<RasterImage>;
}

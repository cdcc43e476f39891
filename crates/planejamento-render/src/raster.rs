//! SVG surface rasterized with resvg
//!
//! The surface is rebuilt from the current plan snapshot; capturing it
//! parses the markup with `usvg`, renders into a `tiny_skia` pixmap and
//! encodes PNG.

use std::sync::Arc;

use async_trait::async_trait;
use planejamento_core::{PageLayout, PlanInput};

use crate::asset::LogoAsset;
use crate::error::{RenderError, RenderResult};
use crate::surface::{CaptureOptions, RasterImage, Readiness, RenderTarget};
use crate::svg::render_svg;

/// Built-in render target backed by SVG markup
pub struct SvgSurface {
    svg: String,
    page_count: usize,
    logo_loaded: bool,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgSurface {
    /// Lay out `plan` with the default pagination policy
    pub fn new(plan: &PlanInput, logo: &LogoAsset) -> Self {
        Self::with_layout(plan, &PageLayout::from_plan(plan), logo)
    }

    /// Use an already assembled layout
    pub fn with_layout(plan: &PlanInput, layout: &PageLayout, logo: &LogoAsset) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();

        if fontdb.is_empty() {
            tracing::warn!("No system fonts found, text rendering may be limited");
        }

        Self {
            svg: render_svg(plan, layout, logo),
            page_count: layout.page_count(),
            logo_loaded: logo.is_loaded(),
            fontdb: Arc::new(fontdb),
        }
    }

    /// SVG markup of the surface
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Number of pages laid out
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Whether the logo image (not the placeholder) is drawn
    pub fn logo_loaded(&self) -> bool {
        self.logo_loaded
    }

    /// Synchronous capture
    pub fn rasterize(&self, options: &CaptureOptions) -> RenderResult<RasterImage> {
        let tree = {
            let mut opts = usvg::Options::default();
            opts.fontdb = Arc::clone(&self.fontdb);
            usvg::Tree::from_str(&self.svg, &opts)
                .map_err(|e| RenderError::InvalidSvg(e.to_string()))?
        };

        let scale = if options.scale > 0.0 { options.scale } else { 1.0 };
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width.max(1), height.max(1)).ok_or_else(|| {
            RenderError::CaptureFailed(format!("Failed to create pixmap ({}x{})", width, height))
        })?;

        if let Some(color) = parse_color(&options.background) {
            pixmap.fill(color);
        }

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encoding(e.to_string()))?;

        tracing::debug!(width = pixmap.width(), height = pixmap.height(), "surface captured");

        Ok(RasterImage {
            png,
            width: pixmap.width(),
            height: pixmap.height(),
        })
    }
}

#[async_trait]
impl RenderTarget for SvgSurface {
    fn name(&self) -> &'static str {
        "svg"
    }

    async fn assets_ready(&self) -> Readiness {
        // The logo is decoded before the surface exists.
        Readiness::Ready
    }

    async fn capture(&self, options: &CaptureOptions) -> RenderResult<RasterImage> {
        self.rasterize(options)
    }
}

/// Parse a CSS color string to tiny_skia::Color
fn parse_color(color: &str) -> Option<tiny_skia::Color> {
    let color = color.trim().to_lowercase();

    match color.as_str() {
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        "transparent" => return Some(tiny_skia::Color::TRANSPARENT),
        _ => {}
    }

    let hex = color.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
        }
        _ => None,
    }
}

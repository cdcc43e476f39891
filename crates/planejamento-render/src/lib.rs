//! planejamento-render - rendering surface for plan pages
//!
//! # Architecture
//!
//! 1. **SVG builder** - lays out a [`PageLayout`](planejamento_core::PageLayout)
//!    as stacked landscape pages (header, logo, four-column table)
//! 2. **Raster capture** - rasterizes the SVG with resvg into a PNG
//!
//! Both stages sit behind the [`RenderTarget`] trait so the export flow can
//! capture any other surface the same way.
//!
//! # Example
//!
//! ```ignore
//! use planejamento_core::PlanInput;
//! use planejamento_render::{CaptureOptions, LogoAsset, SvgSurface};
//!
//! let surface = SvgSurface::new(&PlanInput::default(), &LogoAsset::Failed);
//! let image = surface.rasterize(&CaptureOptions::default())?;
//! ```

mod asset;
mod error;
mod raster;
mod surface;
pub mod svg;

pub use asset::{LogoAsset, LOGO_PLACEHOLDER};
pub use error::{RenderError, RenderResult};
pub use raster::SvgSurface;
pub use surface::{CaptureOptions, RasterImage, Readiness, RenderTarget};
pub use svg::{render_svg, wrap_text, PAGE_HEIGHT, PAGE_WIDTH};

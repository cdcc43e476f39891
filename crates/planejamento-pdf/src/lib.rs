//! planejamento-pdf - PDF export via Typst
//!
//! # Architecture
//!
//! The export pipeline consists of three stages:
//!
//! 1. **Sheets** - tiles a raster capture across landscape A4 sheets
//! 2. **Transpiler** - turns the sheet layout into Typst markup
//! 3. **Compiler** - compiles the markup, with the capture as an image, to PDF
//!
//! [`ExportTrigger`] drives the stages for a
//! [`RenderTarget`](planejamento_render::RenderTarget): it waits for the
//! target to settle, captures it, builds the PDF and saves it.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use planejamento_core::PlanInput;
//! use planejamento_pdf::{ExportConfig, ExportTrigger, Notifier};
//! use planejamento_render::{LogoAsset, SvgSurface};
//!
//! struct Alert;
//!
//! impl Notifier for Alert {
//!     fn alert(&self, message: &str) {
//!         eprintln!("{}", message);
//!     }
//! }
//!
//! let plan = PlanInput::default();
//! let surface = SvgSurface::new(&plan, &LogoAsset::Failed);
//! let trigger = ExportTrigger::new(ExportConfig::default(), Arc::new(Alert));
//! let outcome = trigger.export(&surface, &plan.metadata()).await;
//! ```

mod compiler;
mod error;
pub mod export;
mod sheets;
mod transpiler;

pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use export::{
    ControlState, ExportConfig, ExportError, ExportOutcome, ExportTrigger, Notifier,
    DISABLED_NOTICE, FAILURE_NOTICE,
};
pub use sheets::{Sheet, SheetFormat, SheetLayout};
pub use transpiler::{Transpiler, CAPTURE_FILE};

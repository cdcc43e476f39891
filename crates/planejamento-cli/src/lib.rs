//! planejamento CLI - Command-line interface library
//!
//! This library provides the CLI functionality for planejamento, including:
//! - Preview: Show how a plan is split into pages
//! - Render: Write the SVG rendering surface
//! - Export: Capture the surface and save the paginated PDF
//!
//! # Library Usage
//!
//! ```ignore
//! use planejamento_cli::{preview_report, PlanArgs};
//! use planejamento_core::Settings;
//!
//! let plan = PlanArgs::default().resolve()?;
//! let report = preview_report(&plan, &Settings::default());
//! println!("{}", report.to_text());
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Show pagination for a plan file
//! planejamento preview semana.toml
//!
//! # Export the PDF into ./pdf
//! planejamento export semana.toml --output pdf/
//!
//! # Fill fields from flags
//! planejamento export --week-start 01 --week-end 07 --month marco \
//!     --roda-inicial "Chamadinha e música"
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{export_command, preview_command, preview_report, render_command};
pub use app::{run_cli, OutputFormat, PlanArgs, PreviewReport};

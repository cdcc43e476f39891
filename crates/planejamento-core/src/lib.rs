//! planejamento-core - weekly plan pagination
//!
//! Turns a [`PlanInput`] snapshot into the list of pages a rendering
//! surface has to draw.
//!
//! # Example
//!
//! ```
//! use planejamento_core::{PlanInput, PageLayout};
//!
//! let plan = PlanInput {
//!     week_start: "01".to_string(),
//!     week_end: "07".to_string(),
//!     month: "Março".to_string(),
//!     opening_circle: "Música e conversa".to_string(),
//!     ..Default::default()
//! };
//!
//! let layout = PageLayout::from_plan(&plan);
//! assert_eq!(layout.page_count(), 1);
//! assert_eq!(plan.metadata().artifact_name(), "Planejamento_Semana_01_a_07_Março.pdf");
//! ```

pub mod assembler;
pub mod error;
pub mod model;
pub mod paginator;
pub mod settings;

pub use assembler::{assemble, PageLayout, PageRecord, MAX_PAGES};
pub use error::{Result, SettingsError};
pub use model::{Activity, ExportMetadata, MetadataField, PlanInput};
pub use paginator::{paginate, Paginator, DEFAULT_MAX_CHUNK_CHARS, MAX_CHUNKS};
pub use settings::{AssetSettings, ExportSettings, PaginationSettings, Settings, CONFIG_FILE_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

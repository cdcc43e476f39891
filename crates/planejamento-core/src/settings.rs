//! Configuration settings
//!
//! Settings are loaded from `planejamento.toml`:
//!
//! ```toml
//! [pagination]
//! max_chunk_chars = 800
//! max_chunks = 10
//! max_pages = 10
//!
//! [export]
//! settle_ms = 500
//! asset_timeout_ms = 15000
//! scale = 2.0
//! output_dir = "."
//!
//! [assets]
//! logo = "assets/logo.png"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assembler::MAX_PAGES;
use crate::error::Result;
use crate::paginator::{Paginator, DEFAULT_MAX_CHUNK_CHARS, MAX_CHUNKS};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "planejamento.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Pagination policy
    pub pagination: PaginationSettings,
    /// Export flow
    pub export: ExportSettings,
    /// Static assets
    pub assets: AssetSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Load `planejamento.toml` from `dir` if it exists, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading settings");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Pagination policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Characters per chunk
    pub max_chunk_chars: usize,
    /// Chunks kept per field
    pub max_chunks: usize,
    /// Pages kept per document
    pub max_pages: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_chunks: MAX_CHUNKS,
            max_pages: MAX_PAGES,
        }
    }
}

impl PaginationSettings {
    /// Paginator configured with these settings
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.max_chunk_chars).with_max_chunks(self.max_chunks)
    }
}

/// Export flow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Fixed wait before capture when the surface has no readiness signal
    pub settle_ms: u64,
    /// Upper bound when waiting on a readiness signal
    pub asset_timeout_ms: u64,
    /// Raster scale factor
    pub scale: f32,
    /// Directory the PDF is written to
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            settle_ms: 500,
            asset_timeout_ms: 15_000,
            scale: 2.0,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    /// Settle interval
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Readiness timeout
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_millis(self.asset_timeout_ms)
    }
}

/// Static asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Logo image (PNG or JPEG)
    pub logo: Option<PathBuf>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            logo: Some(PathBuf::from("assets/logo.png")),
        }
    }
}

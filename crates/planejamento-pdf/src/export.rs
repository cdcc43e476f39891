//! Export trigger
//!
//! Orchestrates settle -> capture -> tile -> compile -> save for one render
//! target. Only one export runs at a time; a failure is reported through the
//! [`Notifier`] and leaves nothing on disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use planejamento_core::{ExportMetadata, ExportSettings, MetadataField};
use planejamento_render::{CaptureOptions, Readiness, RenderError, RenderTarget};
use thiserror::Error;

use crate::compiler::Compiler;
use crate::error::PdfError;
use crate::sheets::{SheetFormat, SheetLayout};
use crate::transpiler::Transpiler;

/// Notice shown when an export fails
pub const FAILURE_NOTICE: &str = "Erro ao gerar PDF. Tente novamente.";

/// Notice shown while the export control is disabled
pub const DISABLED_NOTICE: &str = "Preencha a semana e o mês para gerar o PDF";

/// User-visible notification channel
pub trait Notifier: Send + Sync {
    /// Show a blocking alert
    fn alert(&self, message: &str);
}

/// Errors raised inside an export run
#[derive(Error, Debug)]
pub enum ExportError {
    /// Capture of the render target failed
    #[error("capture failed: {0}")]
    Capture(#[from] RenderError),

    /// Tiling or compilation failed
    #[error("document assembly failed: {0}")]
    Pdf(#[from] PdfError),

    /// Writing the artifact failed
    #[error("saving failed: {0}")]
    Io(#[from] std::io::Error),

    /// The compilation task died
    #[error("export task failed: {0}")]
    Task(String),
}

/// State of the caller-facing export control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    Enabled,
    Disabled { missing: Vec<MetadataField> },
    /// An export is in flight
    Busy,
}

impl ControlState {
    /// Derive the control state from plan metadata
    pub fn of(metadata: &ExportMetadata) -> Self {
        let missing = metadata.missing_fields();
        if missing.is_empty() {
            ControlState::Enabled
        } else {
            ControlState::Disabled { missing }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ControlState::Enabled)
    }
}

/// Result of one export invocation
#[derive(Debug)]
pub enum ExportOutcome {
    /// PDF written to this path
    Saved(PathBuf),
    /// Control disabled; nothing happened
    Disabled(Vec<MetadataField>),
    /// Another export is still running; nothing happened
    Busy,
    /// Export aborted; the failure notice was shown
    Failed(ExportError),
}

impl ExportOutcome {
    /// Saved path, if any
    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Saved(path) => Some(path),
            _ => None,
        }
    }
}

/// Export flow configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Fixed wait used when the target has no readiness signal
    pub settle: Duration,
    /// Upper bound on waiting for a readiness signal
    pub asset_timeout: Duration,
    pub capture: CaptureOptions,
    pub format: SheetFormat,
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::from_settings(&ExportSettings::default())
    }
}

impl ExportConfig {
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self {
            settle: settings.settle(),
            asset_timeout: settings.asset_timeout(),
            capture: CaptureOptions::default().with_scale(settings.scale),
            format: SheetFormat::A4_LANDSCAPE,
            output_dir: settings.output_dir.clone(),
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Clears the in-flight flag when an export ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// On-demand export of a render target to PDF
pub struct ExportTrigger {
    config: ExportConfig,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl ExportTrigger {
    pub fn new(config: ExportConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Control state for `metadata`, disabled while an export runs
    pub fn control_state(&self, metadata: &ExportMetadata) -> ControlState {
        match ControlState::of(metadata) {
            ControlState::Enabled if self.is_busy() => ControlState::Busy,
            state => state,
        }
    }

    /// Whether an export is running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Export `target` as a PDF named after `metadata`
    pub async fn export(&self, target: &dyn RenderTarget, metadata: &ExportMetadata) -> ExportOutcome {
        if let ControlState::Disabled { missing } = ControlState::of(metadata) {
            tracing::debug!(?missing, "export control disabled");
            return ExportOutcome::Disabled(missing);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("export already in flight");
            return ExportOutcome::Busy;
        }
        let _guard = InFlight(&self.in_flight);

        match self.run(target, metadata).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "PDF saved");
                ExportOutcome::Saved(path)
            }
            Err(e) => {
                tracing::error!(surface = target.name(), error = %e, "PDF export failed");
                self.notifier.alert(FAILURE_NOTICE);
                ExportOutcome::Failed(e)
            }
        }
    }

    async fn run(&self, target: &dyn RenderTarget, metadata: &ExportMetadata) -> Result<PathBuf, ExportError> {
        self.settle(target).await;

        let image = target.capture(&self.config.capture).await?;
        tracing::info!(width = image.width, height = image.height, "render target captured");

        let layout = SheetLayout::tile(image.width, image.height, self.config.format)?;
        let name = metadata.artifact_name();
        let title = name.trim_end_matches(".pdf").to_string();
        let markup = Transpiler::transpile(&layout, &title);
        tracing::debug!(sheets = layout.sheet_count(), "tiling capture");

        let pdf = tokio::task::spawn_blocking(move || Compiler::compile(&markup, image.png))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;

        self.save(&name, &pdf).await
    }

    /// Wait for the target's readiness signal, or the fixed settle interval
    async fn settle(&self, target: &dyn RenderTarget) {
        match tokio::time::timeout(self.config.asset_timeout, target.assets_ready()).await {
            Ok(Readiness::Ready) => tracing::debug!("assets ready"),
            Ok(Readiness::Unsupported) => tokio::time::sleep(self.config.settle).await,
            Err(_) => tracing::warn!(
                timeout_ms = self.config.asset_timeout.as_millis() as u64,
                "assets not ready in time, capturing anyway"
            ),
        }
    }

    /// Write through a `.part` file so a failed write leaves no PDF behind
    async fn save(&self, name: &str, pdf: &[u8]) -> Result<PathBuf, ExportError> {
        let dir = &self.config.output_dir;
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(name);
        let partial = path.with_extension("pdf.part");

        let written = match tokio::fs::write(&partial, pdf).await {
            Ok(()) => tokio::fs::rename(&partial, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planejamento_core::PlanInput;

    #[test]
    fn test_control_state() {
        let plan = PlanInput {
            week_start: "01".to_string(),
            week_end: "07".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ControlState::of(&plan.metadata()),
            ControlState::Disabled {
                missing: vec![MetadataField::PeriodLabel]
            }
        );

        let complete = PlanInput {
            month: "marco".to_string(),
            ..plan
        };
        assert!(ControlState::of(&complete.metadata()).is_enabled());
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ExportSettings {
            settle_ms: 250,
            scale: 3.0,
            ..Default::default()
        };
        let config = ExportConfig::from_settings(&settings).with_output_dir("out");

        assert_eq!(config.settle, Duration::from_millis(250));
        assert_eq!(config.asset_timeout, Duration::from_secs(15));
        assert_eq!(config.capture.scale, 3.0);
        assert_eq!(config.format, SheetFormat::A4_LANDSCAPE);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}

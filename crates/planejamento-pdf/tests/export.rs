//! Integration tests for the export trigger
//!
//! Fake render targets exercise settle timing, failure reporting and the
//! re-entry guard; the SVG surface exercises the full pipeline.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use planejamento_core::{ExportMetadata, MetadataField, PlanInput};
use planejamento_pdf::{
    ControlState, ExportConfig, ExportOutcome, ExportTrigger, Notifier, FAILURE_NOTICE,
};
use planejamento_render::{
    CaptureOptions, LogoAsset, RasterImage, Readiness, RenderError, RenderResult, RenderTarget,
    SvgSurface,
};
use tempfile::TempDir;
use tokio::time::Instant;

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[derive(Clone, Copy)]
enum Signal {
    None,
    Ready,
    Never,
}

struct FakeTarget {
    signal: Signal,
    fail: bool,
    captures: AtomicUsize,
}

impl FakeTarget {
    fn new(signal: Signal) -> Self {
        Self {
            signal,
            fail: false,
            captures: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Signal::Ready)
        }
    }

    fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderTarget for FakeTarget {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn assets_ready(&self) -> Readiness {
        match self.signal {
            Signal::None => Readiness::Unsupported,
            Signal::Ready => Readiness::Ready,
            Signal::Never => std::future::pending().await,
        }
    }

    async fn capture(&self, _options: &CaptureOptions) -> RenderResult<RasterImage> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RenderError::CaptureFailed("canvas tainted".to_string()));
        }
        let mut pixmap = tiny_skia::Pixmap::new(297, 420).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(RasterImage {
            png: pixmap.encode_png().unwrap(),
            width: 297,
            height: 420,
        })
    }
}

fn metadata() -> ExportMetadata {
    ExportMetadata {
        range_start: "01".to_string(),
        range_end: "07".to_string(),
        period_label: "marco".to_string(),
    }
}

fn trigger(dir: &Path) -> (ExportTrigger, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = ExportConfig::default().with_output_dir(dir);
    (ExportTrigger::new(config, notifier.clone()), notifier)
}

/// Page objects in a PDF, not counting the `/Pages` tree nodes
fn pdf_page_count(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page";
    pdf.windows(needle.len() + 1)
        .filter(|w| w.starts_with(needle) && w[needle.len()] != b's')
        .count()
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test(start_paused = true)]
async fn saves_named_pdf() {
    let dir = TempDir::new().unwrap();
    let (trigger, notifier) = trigger(dir.path());
    let target = FakeTarget::new(Signal::Ready);

    let outcome = trigger.export(&target, &metadata()).await;

    let path = outcome.saved_path().expect("export should succeed").to_path_buf();
    assert_eq!(
        path.file_name().unwrap(),
        "Planejamento_Semana_01_a_07_marco.pdf"
    );
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    assert_eq!(files_in(dir.path()), vec!["Planejamento_Semana_01_a_07_marco.pdf"]);
    assert!(notifier.alerts().is_empty());
    assert!(!trigger.is_busy());
}

#[tokio::test(start_paused = true)]
async fn disabled_without_period_label() {
    let dir = TempDir::new().unwrap();
    let (trigger, notifier) = trigger(dir.path());
    let target = FakeTarget::new(Signal::Ready);
    let incomplete = ExportMetadata {
        period_label: String::new(),
        ..metadata()
    };

    assert!(!trigger.control_state(&incomplete).is_enabled());

    let outcome = trigger.export(&target, &incomplete).await;
    match outcome {
        ExportOutcome::Disabled(missing) => assert_eq!(missing, vec![MetadataField::PeriodLabel]),
        other => panic!("expected Disabled, got {:?}", other),
    }
    assert_eq!(target.captures(), 0);
    assert!(files_in(dir.path()).is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fixed_settle_delay_without_signal() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let target = FakeTarget::new(Signal::None);

    let start = Instant::now();
    let outcome = trigger.export(&target, &metadata()).await;

    assert!(outcome.saved_path().is_some());
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn readiness_signal_skips_fixed_delay() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let target = FakeTarget::new(Signal::Ready);

    let start = Instant::now();
    trigger.export(&target, &metadata()).await;

    assert!(start.elapsed() < Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn readiness_timeout_still_captures() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let target = FakeTarget::new(Signal::Never);

    let start = Instant::now();
    let outcome = trigger.export(&target, &metadata()).await;

    assert!(outcome.saved_path().is_some());
    assert_eq!(target.captures(), 1);
    assert!(start.elapsed() >= Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn capture_failure_alerts_and_leaves_nothing() {
    let dir = TempDir::new().unwrap();
    let (trigger, notifier) = trigger(dir.path());
    let target = FakeTarget::failing();

    let outcome = trigger.export(&target, &metadata()).await;

    assert!(matches!(outcome, ExportOutcome::Failed(_)));
    assert_eq!(notifier.alerts(), vec![FAILURE_NOTICE.to_string()]);
    assert!(files_in(dir.path()).is_empty());
    assert!(!trigger.is_busy());

    // No retry: one capture attempt only.
    assert_eq!(target.captures(), 1);
}

#[tokio::test(start_paused = true)]
async fn second_export_while_in_flight_is_busy() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let target = FakeTarget::new(Signal::None);
    let meta = metadata();

    let (first, second) = tokio::join!(
        trigger.export(&target, &meta),
        trigger.export(&target, &meta)
    );

    assert!(first.saved_path().is_some());
    assert!(matches!(second, ExportOutcome::Busy));
    assert_eq!(target.captures(), 1);

    // The guard is released afterwards.
    let third = trigger.export(&target, &meta).await;
    assert!(third.saved_path().is_some());
}

#[tokio::test(start_paused = true)]
async fn control_reports_busy_while_in_flight() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let target = FakeTarget::new(Signal::None);
    let meta = metadata();

    assert_eq!(trigger.control_state(&meta), ControlState::Enabled);

    let (outcome, during) = tokio::join!(trigger.export(&target, &meta), async {
        tokio::task::yield_now().await;
        trigger.control_state(&meta)
    });

    assert!(outcome.saved_path().is_some());
    assert_eq!(during, ControlState::Busy);
    assert_eq!(trigger.control_state(&meta), ControlState::Enabled);
}

#[tokio::test]
async fn svg_surface_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (trigger, notifier) = trigger(dir.path());
    let plan = PlanInput {
        week_start: "10".to_string(),
        week_end: "14".to_string(),
        month: "Março".to_string(),
        opening_circle: "Roda de conversa e calendário.".to_string(),
        guided_activity: "Exploração de texturas com elementos da natureza. ".repeat(40),
        ..Default::default()
    };
    let surface = SvgSurface::new(&plan, &LogoAsset::Failed);
    assert_eq!(surface.page_count(), 3);

    let outcome = trigger.export(&surface, &plan.metadata()).await;

    let path = outcome.saved_path().expect("export should succeed");
    assert!(path.ends_with("Planejamento_Semana_10_a_14_Março.pdf"));
    let pdf = std::fs::read(path).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(pdf_page_count(&pdf), 3);
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn grown_page_spans_extra_sheet() {
    let dir = TempDir::new().unwrap();
    let (trigger, _) = trigger(dir.path());
    let plan = PlanInput {
        week_start: "10".to_string(),
        week_end: "14".to_string(),
        month: "Março".to_string(),
        opening_circle: (1..=60).map(|i| format!("Item {}\n", i)).collect(),
        ..Default::default()
    };
    let surface = SvgSurface::new(&plan, &LogoAsset::Failed);
    assert_eq!(surface.page_count(), 1);

    let outcome = trigger.export(&surface, &plan.metadata()).await;

    let pdf = std::fs::read(outcome.saved_path().expect("export should succeed")).unwrap();
    assert_eq!(pdf_page_count(&pdf), 2);
}

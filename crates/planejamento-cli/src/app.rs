//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use planejamento_core::{Activity, MetadataField, PageLayout, PlanInput, Settings};
use planejamento_pdf::{
    ControlState, ExportConfig, ExportOutcome, ExportTrigger, Notifier, DISABLED_NOTICE,
};
use planejamento_render::{LogoAsset, SvgSurface};

/// Output format for previews
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "planejamento")]
#[command(author, version, about = "Weekly childcare plan to paginated PDF", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./planejamento.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the plan is split into pages
    Preview {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the SVG rendering surface
    Render {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output SVG file
        #[arg(short, long, default_value = "preview.svg")]
        output: PathBuf,

        /// Logo image (overrides the configured one)
        #[arg(long)]
        logo: Option<PathBuf>,
    },

    /// Export the plan as a PDF
    Export {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output directory (overrides the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image (overrides the configured one)
        #[arg(long)]
        logo: Option<PathBuf>,
    },
}

/// Plan fields from a file, overridden by flags
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Plan file (.toml or .json)
    pub plan: Option<PathBuf>,

    /// First day of the week
    #[arg(long)]
    pub week_start: Option<String>,

    /// Last day of the week
    #[arg(long)]
    pub week_end: Option<String>,

    /// Month label
    #[arg(long)]
    pub month: Option<String>,

    /// Roda inicial
    #[arg(long)]
    pub roda_inicial: Option<String>,

    /// Atividade dirigida
    #[arg(long)]
    pub atividade_dirigida: Option<String>,

    /// Atividade de livre escolha da criança
    #[arg(long)]
    pub atividade_livre_escolha: Option<String>,

    /// Atividade diversificada
    #[arg(long)]
    pub atividade_diversificada: Option<String>,
}

impl PlanArgs {
    /// Build the plan snapshot
    pub fn resolve(&self) -> Result<PlanInput> {
        let mut plan = match &self.plan {
            Some(path) => PlanInput::load(path)
                .with_context(|| format!("Failed to read plan file: {}", path.display()))?,
            None => PlanInput::default(),
        };

        let overrides = [
            (&self.week_start, &mut plan.week_start),
            (&self.week_end, &mut plan.week_end),
            (&self.month, &mut plan.month),
            (&self.roda_inicial, &mut plan.opening_circle),
            (&self.atividade_dirigida, &mut plan.guided_activity),
            (&self.atividade_livre_escolha, &mut plan.free_choice_activity),
            (&self.atividade_diversificada, &mut plan.diversified_activity),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        Ok(plan)
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview { plan, format } => {
            preview_command(&plan.resolve()?, &settings, format)?;
        }
        Commands::Render { plan, output, logo } => {
            render_command(&plan.resolve()?, &settings, &output, logo.as_deref())?;
        }
        Commands::Export { plan, output, logo } => {
            let outcome =
                export_command(&plan.resolve()?, &settings, output.as_deref(), logo.as_deref())?;
            match outcome {
                ExportOutcome::Saved(path) => println!("  Created: {}", path.display()),
                ExportOutcome::Disabled(_) => eprintln!("{}", DISABLED_NOTICE),
                ExportOutcome::Busy => eprintln!("Export already running"),
                ExportOutcome::Failed(e) => anyhow::bail!("Export failed: {}", e),
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Settings::discover(Path::new(".")).context("Failed to load planejamento.toml"),
    }
}

fn layout_for(plan: &PlanInput, settings: &Settings) -> PageLayout {
    PageLayout::from_plan_with(
        plan,
        &settings.pagination.paginator(),
        settings.pagination.max_pages,
    )
}

fn logo_for(settings: &Settings, logo: Option<&Path>) -> LogoAsset {
    LogoAsset::load_optional(logo.or(settings.assets.logo.as_deref()))
}

/// Pagination summary of a plan
#[derive(Debug, Serialize)]
pub struct PreviewReport {
    pub title: String,
    pub artifact_name: String,
    pub page_count: usize,
    pub max_pages: usize,
    pub export_enabled: bool,
    pub missing: Vec<MetadataField>,
    pub pages: Vec<PagePreview>,
}

/// One rendered page in a preview
#[derive(Debug, Serialize)]
pub struct PagePreview {
    pub index: usize,
    pub number: usize,
    pub cells: Vec<CellPreview>,
}

/// One table cell in a preview
#[derive(Debug, Serialize)]
pub struct CellPreview {
    pub column: Activity,
    pub text: String,
}

impl PreviewReport {
    /// Human-readable rendering
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title));

        for page in &self.pages {
            out.push_str(&format!("\nPágina {} (índice {})\n", page.number, page.index));
            for cell in &page.cells {
                out.push_str(&format!(
                    "  {}: {} caracteres\n",
                    cell.column.heading(),
                    cell.text.chars().count()
                ));
            }
        }

        out.push_str(&format!(
            "\nPáginas geradas: {} (máximo: {})\n",
            self.page_count, self.max_pages
        ));
        if self.export_enabled {
            out.push_str(&format!("Arquivo: {}\n", self.artifact_name));
        } else {
            out.push_str(&format!("{}\n", DISABLED_NOTICE));
        }
        out
    }
}

/// Build the preview report for a plan
pub fn preview_report(plan: &PlanInput, settings: &Settings) -> PreviewReport {
    let layout = layout_for(plan, settings);
    let metadata = plan.metadata();
    let state = ControlState::of(&metadata);

    let pages = layout
        .records()
        .map(|record| PagePreview {
            index: record.index,
            number: record.number,
            cells: Activity::ALL
                .iter()
                .map(|&column| CellPreview {
                    column,
                    text: layout.cell(record.index, column).to_string(),
                })
                .collect(),
        })
        .collect();

    PreviewReport {
        title: plan.header_title(),
        artifact_name: metadata.artifact_name(),
        page_count: layout.page_count(),
        max_pages: settings.pagination.max_pages,
        export_enabled: state.is_enabled(),
        missing: match state {
            ControlState::Disabled { missing } => missing,
            _ => Vec::new(),
        },
        pages,
    }
}

/// Execute the preview command
pub fn preview_command(plan: &PlanInput, settings: &Settings, format: OutputFormat) -> Result<()> {
    let report = preview_report(plan, settings);
    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize preview")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Execute the render command
pub fn render_command(
    plan: &PlanInput,
    settings: &Settings,
    output: &Path,
    logo: Option<&Path>,
) -> Result<()> {
    let layout = layout_for(plan, settings);
    let surface = SvgSurface::with_layout(plan, &layout, &logo_for(settings, logo));

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output, surface.svg())
        .with_context(|| format!("Failed to write SVG file: {}", output.display()))?;

    println!("  Created: {} ({} pages)", output.display(), surface.page_count());
    Ok(())
}

/// Alerts go to stderr
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Execute the export command
pub fn export_command(
    plan: &PlanInput,
    settings: &Settings,
    output_dir: Option<&Path>,
    logo: Option<&Path>,
) -> Result<ExportOutcome> {
    let layout = layout_for(plan, settings);
    let surface = SvgSurface::with_layout(plan, &layout, &logo_for(settings, logo));

    let mut config = ExportConfig::from_settings(&settings.export);
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    let trigger = ExportTrigger::new(config, Arc::new(StderrNotifier));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    Ok(runtime.block_on(trigger.export(&surface, &plan.metadata())))
}

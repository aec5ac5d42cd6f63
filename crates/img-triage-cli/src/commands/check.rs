//! Check command - analyze images and report quality flags.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use img_triage_adapters::{default_store_dir, FsImageSource, JsonlTagSink, ReportStore};
use img_triage_core::{
    apply_tags, AggregateReport, Analyzer, ImageSource, Pipeline, QualityConfig, ReportSink,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::{AppConfig, ThresholdsConfig};
use crate::output::{render_csv, CsvOutput, JsonMode, JsonOutput, ProgressBar};

/// Collection id used when none is configured.
const DEFAULT_COLLECTION: &str = "default";

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Single JSON array
    Json,
    /// JSON Lines (one JSON object per line)
    Jsonl,
}

/// Parse and validate a threshold value (finite, non-negative).
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a finite, non-negative number"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Laplacian variance below which an image is blurry [default: 100]
    #[arg(long, env = "IMG_TRIAGE_BLUR_TH", value_parser = parse_threshold)]
    pub blur_th: Option<f64>,

    /// Mean brightness below which an image is dark [default: 60]
    #[arg(long, env = "IMG_TRIAGE_LOW_BRIGHTNESS", value_parser = parse_threshold)]
    pub low_brightness: Option<f64>,

    /// Mean brightness above which an image is bright [default: 200]
    #[arg(long, env = "IMG_TRIAGE_HIGH_BRIGHTNESS", value_parser = parse_threshold)]
    pub high_brightness: Option<f64>,

    /// Channel-difference spread below which an image is grayscale [default: 2]
    #[arg(long, env = "IMG_TRIAGE_GRAYSCALE_TOL", value_parser = parse_threshold)]
    pub grayscale_tol: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Persist the CSV report to the report store
    #[arg(long, env = "IMG_TRIAGE_EXPORT")]
    pub export: bool,

    /// Collection id the exported report is stored under
    #[arg(long, value_name = "ID")]
    pub collection: Option<String>,

    /// Report store directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Write quality labels of flagged images to this JSON Lines file
    #[arg(long, value_name = "FILE")]
    pub tags: Option<PathBuf>,

    /// Analyze images one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. Environment variables and CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }
        if !args.sequential {
            args.sequential = config.general.sequential.unwrap_or(false);
        }

        let t = &config.thresholds;
        args.blur_th = args.blur_th.or(t.blur_th);
        args.low_brightness = args.low_brightness.or(t.low_brightness);
        args.high_brightness = args.high_brightness.or(t.high_brightness);
        args.grayscale_tol = args.grayscale_tol.or(t.grayscale_tol);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        if !args.export {
            args.export = config.export.enabled.unwrap_or(false);
        }
        if args.collection.is_none() {
            args.collection.clone_from(&config.export.collection);
        }
        if args.store_dir.is_none() {
            args.store_dir.clone_from(&config.export.store_dir);
        }

        args
    }

    /// Thresholds with unset values filled from the built-in defaults.
    pub fn quality_config(&self) -> QualityConfig {
        ThresholdsConfig {
            blur_th: self.blur_th,
            low_brightness: self.low_brightness,
            high_brightness: self.high_brightness,
            grayscale_tol: self.grayscale_tol,
        }
        .resolve()
    }

    /// Get output format with fallback to CSV.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of images ingested into the report.
    pub processed: usize,
    /// Number of images skipped.
    pub skipped: usize,
    /// Number of images with at least one flag.
    pub flagged: usize,
    /// Where the report was persisted, if exported.
    pub stored: Option<PathBuf>,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let config = args.quality_config();
    if config.brightness_window_inverted() {
        warn!(
            "low brightness threshold ({}) is not below high brightness threshold ({})",
            config.low_brightness, config.high_brightness
        );
    }
    let analyzer = Analyzer::new(config).context("Invalid threshold configuration")?;
    debug!("Thresholds: {config:?}");

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let outcome = Pipeline::new(analyzer)
        .with_parallel(!args.sequential)
        .run(&source, &progress_bar);
    let report = outcome.report;

    write_report(&report, args)?;

    if let Some(ref path) = args.tags {
        let sink = JsonlTagSink::create(path)?;
        let tagged = apply_tags(&report, &sink)?;
        info!("Tagged {tagged} images in {}", path.display());
    }

    let stored = if args.export {
        Some(export_report(&report, args)?)
    } else {
        None
    };

    if !args.quiet {
        eprintln!("{}", report.summary());
        if let Some(ref path) = stored {
            eprintln!("Report stored at {}", path.display());
        }
    }

    let flagged = report.flagged();
    let exit_code = if flagged > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed: report.counters().total,
        skipped: outcome.skipped,
        flagged,
        stored,
        exit_code,
    })
}

/// Render the report rows to stdout in the selected format.
fn write_report(report: &AggregateReport, args: &CheckArgs) -> Result<()> {
    let sink: Box<dyn ReportSink> = match args.format() {
        OutputFormat::Csv => Box::new(CsvOutput::stdout()),
        OutputFormat::Json => Box::new(JsonOutput::stdout(JsonMode::Array {
            pretty: args.pretty,
        })),
        OutputFormat::Jsonl => Box::new(JsonOutput::stdout(JsonMode::Lines)),
    };
    sink.write_report(report)?;
    sink.flush()
}

/// Persist the CSV rendering of the report under the configured collection.
fn export_report(report: &AggregateReport, args: &CheckArgs) -> Result<PathBuf> {
    let store = ReportStore::new(args.store_dir.clone().unwrap_or_else(default_store_dir));
    let bytes = render_csv(report)?;
    let stored = store
        .persist(args.collection(), &bytes)
        .with_context(|| format!("Failed to export report for '{}'", args.collection()))?;
    info!(
        "Exported {} rows to {} (sha256 {})",
        report.rows().len(),
        stored.path.display(),
        stored.sha256
    );
    Ok(stored.path)
}

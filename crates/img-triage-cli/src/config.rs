//! Configuration file support for img-triage.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/img-triage/config.toml` (lowest priority)
//! - Project-local: `.img-triage.toml` (searched up directory tree)
//! - Environment and CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use img_triage_core::QualityConfig;
use serde::Deserialize;
use tracing::{debug, info};

const PROJECT_FILE: &str = ".img-triage.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Analysis thresholds.
    pub thresholds: ThresholdsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
    /// Report export settings.
    pub export: ExportConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Analyze one image at a time.
    pub sequential: Option<bool>,
}

/// Threshold overrides. Unset values fall back to [`QualityConfig::default`].
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Laplacian variance below which an image is blurry.
    pub blur_th: Option<f64>,
    /// Mean brightness below which an image is dark.
    pub low_brightness: Option<f64>,
    /// Mean brightness above which an image is bright.
    pub high_brightness: Option<f64>,
    /// Channel-difference spread below which an image is grayscale.
    pub grayscale_tol: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "csv", "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

/// Report export configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Persist every report to the store.
    pub enabled: Option<bool>,
    /// Collection id reports are stored under.
    pub collection: Option<String>,
    /// Report store root directory.
    pub store_dir: Option<PathBuf>,
}

impl ThresholdsConfig {
    /// Resolves the overrides on top of the built-in defaults.
    pub fn resolve(&self) -> QualityConfig {
        let defaults = QualityConfig::default();
        QualityConfig {
            blur_th: self.blur_th.unwrap_or(defaults.blur_th),
            low_brightness: self.low_brightness.unwrap_or(defaults.low_brightness),
            high_brightness: self.high_brightness.unwrap_or(defaults.high_brightness),
            grayscale_tol: self.grayscale_tol.unwrap_or(defaults.grayscale_tol),
        }
    }
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/img-triage/config.toml`
    /// 2. Project-local: `.img-triage.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings
    /// and rejected later, before any image is processed.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let t = &self.thresholds;
        for (name, value) in [
            ("thresholds.blur_th", t.blur_th),
            ("thresholds.low_brightness", t.low_brightness),
            ("thresholds.high_brightness", t.high_brightness),
            ("thresholds.grayscale_tol", t.grayscale_tol),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{name} must be a finite, non-negative number, got {v}"));
                }
            }
        }

        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "csv" | "json" | "jsonl") {
                return Err(format!(
                    "output.format must be 'csv', 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        if let Some(ref c) = self.export.collection {
            if c.is_empty()
                || c.starts_with('.')
                || !c
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
            {
                return Err(format!(
                    "export.collection may only contain letters, digits, '.', '_' and '-', got '{c}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);
        self.general.sequential = other.general.sequential.or(self.general.sequential);

        self.thresholds.blur_th = other.thresholds.blur_th.or(self.thresholds.blur_th);
        self.thresholds.low_brightness = other
            .thresholds
            .low_brightness
            .or(self.thresholds.low_brightness);
        self.thresholds.high_brightness = other
            .thresholds
            .high_brightness
            .or(self.thresholds.high_brightness);
        self.thresholds.grayscale_tol = other
            .thresholds
            .grayscale_tol
            .or(self.thresholds.grayscale_tol);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);

        self.export.enabled = other.export.enabled.or(self.export.enabled);
        self.export.collection = other
            .export
            .collection
            .or_else(|| self.export.collection.take());
        self.export.store_dir = other
            .export
            .store_dir
            .or_else(|| self.export.store_dir.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("img-triage").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.img-triage.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_FILE))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

//! Durable report storage keyed by collection id.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Subdirectory under the store root that holds reports.
const REPORTS_SUBDIR: &str = "image_quality_analyzer";

/// A report persisted by [`ReportStore::persist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    /// Final location of the report.
    pub path: PathBuf,
    /// Size in bytes.
    pub bytes: usize,
    /// Hex-encoded SHA-256 of the contents.
    pub sha256: String,
}

/// Filesystem report store.
///
/// Reports land at `<root>/image_quality_analyzer/<collection>_report.csv`.
/// Persisting the same collection again replaces the previous report.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

/// Returns the default store root.
///
/// Uses `XDG_DATA_HOME/img-triage/reports` or `~/.local/share/img-triage/reports`.
#[must_use]
pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("img-triage")
        .join("reports")
}

impl ReportStore {
    /// Creates a store rooted at `root`. Nothing is created until the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a store at [`default_store_dir`].
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(default_store_dir())
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns where the report for `collection` is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `collection` is not a valid identifier.
    pub fn report_path(&self, collection: &str) -> Result<PathBuf> {
        validate_collection(collection)?;
        Ok(self
            .root
            .join(REPORTS_SUBDIR)
            .join(format!("{collection}_report.csv")))
    }

    /// Writes `contents` as the report for `collection`.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// readers never observe a partial report.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection id is invalid or any filesystem
    /// operation fails.
    pub fn persist(&self, collection: &str, contents: &[u8]) -> Result<StoredReport> {
        let path = self.report_path(collection)?;
        let dir = path
            .parent()
            .context("Report path has no parent directory")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

        let tmp = path.with_extension("csv.tmp");
        {
            let mut file = fs::File::create(&tmp)
                .with_context(|| format!("Failed to create {}", tmp.display()))?;
            file.write_all(contents)
                .with_context(|| format!("Failed to write {}", tmp.display()))?;
            file.sync_all()
                .with_context(|| format!("Failed to sync {}", tmp.display()))?;
        }
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move report into {}", path.display()))?;

        let sha256 = hex_digest(contents);
        debug!("Report for {collection} has sha256 {sha256}");
        info!("Stored report: {} ({} bytes)", path.display(), contents.len());

        Ok(StoredReport {
            path,
            bytes: contents.len(),
            sha256,
        })
    }

    /// Lists collection ids with a stored report, sorted.
    ///
    /// Files whose stem is not a valid collection id are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the reports directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let dir = self.root.join(REPORTS_SUBDIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<String> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .flatten()
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix("_report.csv"))
                    .filter(|stem| validate_collection(stem).is_ok())
                    .map(str::to_string)
            })
            .collect();
        ids.sort();
        Ok(ids)
    }
}

/// Collection ids become file names, so only a conservative character set is allowed.
fn validate_collection(collection: &str) -> Result<()> {
    let valid = !collection.is_empty()
        && !collection.starts_with('.')
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid {
        anyhow::bail!(
            "Invalid collection id '{collection}': use letters, digits, '.', '_' or '-'"
        );
    }
    Ok(())
}

fn hex_digest(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("{:x}", hasher.finalize())
}

//! Reports command - list persisted reports.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use img_triage_adapters::{default_store_dir, ReportStore};
use tracing::debug;

use crate::config::AppConfig;

/// Arguments for the reports command.
#[derive(Args, Clone)]
pub struct ReportsArgs {
    /// Report store directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

/// List every stored collection with its report path.
pub fn run(args: &ReportsArgs, config: &AppConfig) -> Result<()> {
    let root = args
        .store_dir
        .clone()
        .or_else(|| config.export.store_dir.clone())
        .unwrap_or_else(default_store_dir);
    debug!("Listing reports under {}", root.display());

    let store = ReportStore::new(root);
    let collections = store.list()?;
    if collections.is_empty() {
        eprintln!("No reports stored in {}", store.root().display());
        return Ok(());
    }

    for collection in collections {
        let path = store.report_path(&collection)?;
        println!("{collection}\t{}", path.display());
    }
    Ok(())
}

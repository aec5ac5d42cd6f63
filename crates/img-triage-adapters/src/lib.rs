//! img-triage adapters - external collaborators for the analysis core.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Durable report storage
//! - Tag output

pub mod fs;
pub mod store;
pub mod tags;

pub use fs::FsImageSource;
pub use store::{default_store_dir, ReportStore, StoredReport};
pub use tags::JsonlTagSink;

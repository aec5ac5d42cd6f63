//! Core domain types for image quality triage.

mod config;
mod image;
mod report;
mod verdict;

pub use config::QualityConfig;
pub use image::ImageInfo;
pub use report::{AggregateReport, Counters, ReportRow};
pub use verdict::{QualityLabel, QualityVerdict};

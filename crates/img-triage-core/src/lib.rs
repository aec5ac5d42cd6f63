//! img-triage core - image quality metrics and batch aggregation.
//!
//! This crate contains the pure analysis function that turns a decoded image
//! into blur, exposure and grayscale signals, the aggregator that folds
//! verdicts into a report, and the ports adapters implement. It performs no
//! I/O and never logs.

pub mod aggregate;
pub mod analyzer;
pub mod domain;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use aggregate::Aggregate;
pub use analyzer::{analyze, Analyzer};
pub use domain::{
    AggregateReport, Counters, ImageInfo, QualityConfig, QualityLabel, QualityVerdict, ReportRow,
};
pub use error::QualityError;
pub use pipeline::{apply_tags, BatchOutcome, Pipeline};
pub use ports::{ImageSource, NoProgress, ProgressEvent, ProgressSink, ReportSink, TagSink};

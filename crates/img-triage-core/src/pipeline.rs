//! Batch driver: enumerate, decode, analyze, ingest, finalize.

use rayon::prelude::*;

use crate::aggregate::Aggregate;
use crate::analyzer::Analyzer;
use crate::domain::{AggregateReport, ImageInfo, QualityVerdict};
use crate::error::QualityError;
use crate::ports::{ImageSource, ProgressEvent, ProgressSink, TagSink};

/// Default number of decoded images held in memory at once.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Result of running a batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// The finished report.
    pub report: AggregateReport,
    /// Images that failed to decode or were rejected by the analyzer.
    pub skipped: usize,
}

/// Runs an [`Analyzer`] over every image from an [`ImageSource`].
///
/// Images are pulled from the source in chunks. Each chunk is analyzed in
/// parallel, then ingested serially in source order, so the report is the
/// same whether or not parallelism is enabled.
#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: Analyzer,
    chunk_size: usize,
    parallel: bool,
}

impl Pipeline {
    /// Creates a parallel pipeline with the default chunk size.
    #[must_use]
    pub const fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: true,
        }
    }

    /// Sets how many decoded images are analyzed together (minimum 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Enables or disables parallel analysis within a chunk.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the analyzer used by this pipeline.
    #[must_use]
    pub const fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Processes every image from `source`.
    ///
    /// Decode errors and per-image [`QualityError`]s are reported to
    /// `progress` as [`ProgressEvent::Skipped`] and never reach the report.
    pub fn run(&self, source: &dyn ImageSource, progress: &dyn ProgressSink) -> BatchOutcome {
        let total = source.count_hint();
        let mut images = source.images().enumerate();
        let mut aggregate = Aggregate::start();
        let mut skipped = 0usize;

        loop {
            let pulled: Vec<_> = images.by_ref().take(self.chunk_size).collect();
            if pulled.is_empty() {
                break;
            }

            let mut decoded = Vec::with_capacity(pulled.len());
            for (index, item) in pulled {
                match item {
                    Ok(image) => {
                        progress.on_event(ProgressEvent::Started {
                            id: image.id.clone(),
                            index,
                            total,
                        });
                        decoded.push(image);
                    }
                    Err(e) => {
                        // The source's error context carries the path
                        progress.on_event(ProgressEvent::Skipped {
                            id: format!("image {index}"),
                            reason: format!("{e:#}"),
                        });
                        skipped += 1;
                    }
                }
            }

            for (image, result) in decoded.iter().zip(self.analyze_chunk(&decoded)) {
                match result {
                    Ok(verdict) => {
                        aggregate.ingest(image.id.clone(), verdict);
                        progress.on_event(ProgressEvent::Completed {
                            id: image.id.clone(),
                            verdict,
                        });
                    }
                    Err(e) => {
                        progress.on_event(ProgressEvent::Skipped {
                            id: image.id.clone(),
                            reason: e.to_string(),
                        });
                        skipped += 1;
                    }
                }
            }
        }

        let report = aggregate.finalize();
        progress.on_event(ProgressEvent::Finished {
            processed: report.rows().len(),
            skipped,
        });

        BatchOutcome { report, skipped }
    }

    fn analyze_chunk(&self, images: &[ImageInfo]) -> Vec<Result<QualityVerdict, QualityError>> {
        if self.parallel && images.len() > 1 {
            images
                .par_iter()
                .map(|image| self.analyzer.analyze(image))
                .collect()
        } else {
            images
                .iter()
                .map(|image| self.analyzer.analyze(image))
                .collect()
        }
    }
}

/// Sends the labels of every flagged row to `sink`, in report order.
///
/// Returns the number of images tagged.
///
/// # Errors
///
/// Returns the first error raised by the sink.
pub fn apply_tags(report: &AggregateReport, sink: &dyn TagSink) -> anyhow::Result<usize> {
    let mut tagged = 0usize;
    for row in report.rows() {
        let labels = row.verdict.labels();
        if labels.is_empty() {
            continue;
        }
        sink.tag(&row.image, &labels)?;
        tagged += 1;
    }
    sink.flush()?;
    Ok(tagged)
}

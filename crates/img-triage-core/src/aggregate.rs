//! Batch aggregation.
//!
//! Folds per-image verdicts into an ordered row list and five running
//! counters. Ingestion is single-writer: concurrent producers must funnel
//! their verdicts through one owner (see [`Pipeline`](crate::Pipeline)).

use crate::domain::{AggregateReport, Counters, QualityVerdict, ReportRow};

/// Mutable running tally for a batch in progress.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    rows: Vec<ReportRow>,
    counters: Counters,
}

impl Aggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }

    /// Appends one row and bumps the matching counters.
    ///
    /// Only call this for images that produced a verdict; failed decodes are
    /// not counted anywhere.
    pub fn ingest(&mut self, id: impl Into<String>, verdict: QualityVerdict) -> &mut Self {
        let counters = &mut self.counters;
        counters.total += 1;
        counters.blur_count += usize::from(verdict.blur);
        counters.dark_count += usize::from(verdict.low_brightness);
        counters.bright_count += usize::from(verdict.high_brightness);
        counters.gray_count += usize::from(verdict.grayscale);

        self.rows.push(ReportRow {
            image: id.into(),
            verdict,
        });
        self
    }

    /// Current counters.
    #[must_use]
    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Number of ingested rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing has been ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Closes the batch.
    #[must_use]
    pub fn finalize(self) -> AggregateReport {
        AggregateReport::new(self.rows, self.counters)
    }
}

impl<S: Into<String>> Extend<(S, QualityVerdict)> for Aggregate {
    fn extend<I: IntoIterator<Item = (S, QualityVerdict)>>(&mut self, iter: I) {
        for (id, verdict) in iter {
            self.ingest(id, verdict);
        }
    }
}

//! Batch report types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::QualityVerdict;

/// One report row: the image identifier and its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Caller-supplied image identifier.
    pub image: String,
    /// Verdict fields, flattened into the row.
    #[serde(flatten)]
    pub verdict: QualityVerdict,
}

/// Running counters over ingested verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Number of ingested rows.
    pub total: usize,
    /// Rows flagged blurry.
    pub blur_count: usize,
    /// Rows flagged underexposed.
    pub dark_count: usize,
    /// Rows flagged overexposed.
    pub bright_count: usize,
    /// Rows flagged grayscale.
    pub gray_count: usize,
}

impl Counters {
    /// Returns the counters as `(metric, count)` pairs for tabular display.
    #[must_use]
    pub const fn metrics(&self) -> [(&'static str, usize); 5] {
        [
            ("Total", self.total),
            ("Blurred", self.blur_count),
            ("Dark", self.dark_count),
            ("Bright", self.bright_count),
            ("Grayscale", self.gray_count),
        ]
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (metric, count)) in self.metrics().iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{metric}: {count}")?;
        }
        Ok(())
    }
}

/// Finished batch report. Immutable once produced by
/// [`Aggregate::finalize`](crate::Aggregate::finalize).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    rows: Vec<ReportRow>,
    counters: Counters,
}

impl AggregateReport {
    pub(crate) const fn new(rows: Vec<ReportRow>, counters: Counters) -> Self {
        Self { rows, counters }
    }

    /// Rows in ingest order.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Summary counters.
    #[must_use]
    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Human-readable summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.counters.to_string()
    }

    /// Number of rows with at least one flag set.
    #[must_use]
    pub fn flagged(&self) -> usize {
        self.rows.iter().filter(|r| r.verdict.is_flagged()).count()
    }
}

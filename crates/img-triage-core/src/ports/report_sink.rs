//! Report sink port for rendering finished batches.

use crate::domain::AggregateReport;

/// Port for outputting a finished report.
pub trait ReportSink: Send + Sync {
    /// Renders the report rows.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_report(&self, report: &AggregateReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}

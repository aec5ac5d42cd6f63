//! CSV report adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use img_triage_core::{AggregateReport, ReportRow, ReportSink};

/// Column order of every tabular report.
pub const HEADER: [&str; 8] = [
    "image",
    "blur",
    "low_brightness",
    "high_brightness",
    "grayscale",
    "brightness",
    "contrast",
    "blur_score",
];

/// CSV output adapter writing a header and one record per row.
pub struct CsvOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl CsvOutput {
    /// Creates a new CSV output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new CSV output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

fn record(row: &ReportRow) -> [String; 8] {
    let v = &row.verdict;
    [
        row.image.clone(),
        v.blur.to_string(),
        v.low_brightness.to_string(),
        v.high_brightness.to_string(),
        v.grayscale.to_string(),
        v.brightness.to_string(),
        v.contrast.to_string(),
        v.blur_score.to_string(),
    ]
}

fn write_rows<W: Write>(out: W, report: &AggregateReport) -> Result<W> {
    let mut wtr = ::csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for row in report.rows() {
        wtr.write_record(record(row))
            .with_context(|| format!("Failed to write row for {}", row.image))?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))
}

/// Renders a report as CSV bytes, header included.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_csv(report: &AggregateReport) -> Result<Vec<u8>> {
    write_rows(Vec::new(), report)
}

impl ReportSink for CsvOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write_report(&self, report: &AggregateReport) -> Result<()> {
        let bytes = render_csv(report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use img_triage_core::{Aggregate, QualityVerdict};

    fn verdict(blur: bool) -> QualityVerdict {
        QualityVerdict {
            blur,
            low_brightness: false,
            high_brightness: false,
            grayscale: true,
            brightness: 128.0,
            contrast: 0.5,
            blur_score: 42.25,
        }
    }

    #[test]
    fn test_header_only_for_empty_report() {
        let bytes = render_csv(&Aggregate::start().finalize()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "image,blur,low_brightness,high_brightness,grayscale,brightness,contrast,blur_score\n"
        );
    }

    #[test]
    fn test_rows_in_ingest_order() {
        let mut agg = Aggregate::start();
        agg.ingest("b.png", verdict(true)).ingest("a.png", verdict(false));
        let text = String::from_utf8(render_csv(&agg.finalize()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "b.png,true,false,false,true,128,0.5,42.25");
        assert_eq!(lines[2], "a.png,false,false,false,true,128,0.5,42.25");
    }

    #[test]
    fn test_ids_with_commas_are_quoted() {
        let mut agg = Aggregate::start();
        agg.ingest("dir/a,b.png", verdict(false));
        let text = String::from_utf8(render_csv(&agg.finalize()).unwrap()).unwrap();
        assert!(text.contains("\"dir/a,b.png\""));
    }
}

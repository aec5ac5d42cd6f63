//! JSON output adapter.

use anyhow::Result;
use img_triage_core::{AggregateReport, ReportSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// How a report is laid out as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonMode {
    /// One object per line.
    Lines,
    /// A single array of rows.
    Array {
        /// Indent the array.
        pretty: bool,
    },
}

/// JSON output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    mode: JsonMode,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(mode: JsonMode) -> Self {
        Self::new(Box::new(io::stdout()), mode)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, mode: JsonMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            mode,
        }
    }
}

impl ReportSink for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write_report(&self, report: &AggregateReport) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        match self.mode {
            JsonMode::Lines => {
                for row in report.rows() {
                    let json = serde_json::to_string(row)?;
                    writeln!(writer, "{json}")?;
                }
            }
            JsonMode::Array { pretty } => {
                let json = if pretty {
                    serde_json::to_string_pretty(report.rows())?
                } else {
                    serde_json::to_string(report.rows())?
                };
                writeln!(writer, "{json}")?;
            }
        }
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

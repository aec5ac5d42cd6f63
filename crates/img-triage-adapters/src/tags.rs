//! JSON Lines tag sink.

use anyhow::{Context, Result};
use img_triage_core::{QualityLabel, TagSink};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

#[derive(Serialize)]
struct TagRecord<'a> {
    image: &'a str,
    tags: &'a [QualityLabel],
}

/// Writes one `{"image": ..., "tags": [...]}` object per tagged image.
pub struct JsonlTagSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonlTagSink {
    /// Creates (or truncates) a tag file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create tag file {}", path.display()))?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// Creates a sink writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl TagSink for JsonlTagSink {
    #[allow(clippy::significant_drop_tightening)]
    fn tag(&self, id: &str, labels: &[QualityLabel]) -> Result<()> {
        let json = serde_json::to_string(&TagRecord {
            image: id,
            tags: labels,
        })?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
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
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_line_per_image() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tags.jsonl");
        let sink = JsonlTagSink::create(&path).unwrap();

        sink.tag("a.jpg", &[QualityLabel::Blurry, QualityLabel::Dark])
            .unwrap();
        sink.tag("b.jpg", &[QualityLabel::Grayscale]).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            [
                r#"{"image":"a.jpg","tags":["blurry","dark"]}"#,
                r#"{"image":"b.jpg","tags":["grayscale"]}"#,
            ]
        );
    }
}

//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use img_triage_core::domain::{AggregateReport, ImageInfo, QualityLabel};
use img_triage_core::ports::{ImageSource, ProgressEvent, ProgressSink, ReportSink, TagSink};

/// One entry yielded by [`MockImageSource`].
#[derive(Clone)]
enum MockEntry {
    Image(ImageInfo),
    DecodeError(String),
}

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images (and optional decode failures) in insertion order
/// and tracks iteration for assertions.
pub struct MockImageSource {
    entries: Vec<MockEntry>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            entries: images.into_iter().map(MockEntry::Image).collect(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends an entry that fails to decode with `message`.
    #[must_use]
    pub fn with_decode_error(mut self, message: &str) -> Self {
        self.entries.push(MockEntry::DecodeError(message.to_string()));
        self
    }

    /// Appends a decodable image.
    #[must_use]
    pub fn with_image(mut self, image: ImageInfo) -> Self {
        self.entries.push(MockEntry::Image(image));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.entries.iter().cloned().map(|entry| match entry {
            MockEntry::Image(image) => Ok(image),
            MockEntry::DecodeError(message) => Err(anyhow::anyhow!(message)),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Mock implementation of `ReportSink` for testing.
///
/// Captures reports for later assertions.
pub struct MockReportSink {
    reports: Arc<Mutex<Vec<AggregateReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<AggregateReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for MockReportSink {
    fn write_report(&self, report: &AggregateReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `TagSink` for testing.
pub struct MockTagSink {
    tags: Arc<Mutex<Vec<(String, Vec<QualityLabel>)>>>,
    fail_on: Option<String>,
}

impl MockTagSink {
    /// Creates a new mock tag sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    /// Creates a sink that rejects updates for image `id`.
    #[must_use]
    pub fn failing_on(id: &str) -> Self {
        Self {
            fail_on: Some(id.to_string()),
            ..Self::new()
        }
    }

    /// Returns all captured `(id, labels)` pairs.
    #[must_use]
    pub fn tags(&self) -> Vec<(String, Vec<QualityLabel>)> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockTagSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSink for MockTagSink {
    fn tag(&self, id: &str, labels: &[QualityLabel]) -> anyhow::Result<()> {
        if self.fail_on.as_deref() == Some(id) {
            anyhow::bail!("annotation store rejected {id}");
        }
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id.to_string(), labels.to_vec()));
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the ids of `Skipped` events.
    #[must_use]
    pub fn skipped_ids(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Skipped { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use img_triage_core::Aggregate;

    #[test]
    fn test_mock_image_source_empty() {
        let source = MockImageSource::empty();
        assert_eq!(source.count_hint(), Some(0));
        assert_eq!(source.images().count(), 0);
        assert_eq!(source.iteration_count(), 1);
    }

    #[test]
    fn test_mock_image_source_with_failures() {
        let img = image::DynamicImage::new_rgb8(10, 10);
        let source = MockImageSource::new(vec![ImageInfo::new("ok.jpg", img)])
            .with_decode_error("corrupt.jpg: bad header");

        let items: Vec<_> = source.images().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_mock_report_sink() {
        let sink = MockReportSink::new();
        sink.write_report(&Aggregate::start().finalize()).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.reports().len(), 1);
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_mock_tag_sink_failure() {
        let sink = MockTagSink::failing_on("bad.jpg");
        assert!(sink.tag("good.jpg", &[QualityLabel::Dark]).is_ok());
        assert!(sink.tag("bad.jpg", &[QualityLabel::Dark]).is_err());
        assert_eq!(sink.tags().len(), 1);
    }

    #[test]
    fn test_mock_progress_sink() {
        let sink = MockProgressSink::new();

        sink.on_event(ProgressEvent::Started {
            id: "test.jpg".into(),
            index: 0,
            total: Some(1),
        });
        sink.on_event(ProgressEvent::Finished {
            processed: 1,
            skipped: 0,
        });

        assert_eq!(sink.started_count(), 1);
        assert_eq!(sink.finished_counts(), Some((1, 0)));
    }
}

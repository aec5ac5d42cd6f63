//! Tagging port for attaching quality labels to source images.

use crate::domain::QualityLabel;

/// Port for attaching labels to an image's annotation record.
///
/// Purely presentational; the verdict is already final when this is called.
pub trait TagSink: Send + Sync {
    /// Attaches `labels` to the image identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation store rejects the update.
    fn tag(&self, id: &str, labels: &[QualityLabel]) -> anyhow::Result<()>;

    /// Flushes any buffered updates.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}

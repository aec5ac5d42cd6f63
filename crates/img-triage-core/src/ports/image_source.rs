//! Image source port for enumerating and decoding images.

use crate::domain::ImageInfo;

/// Port for loading images from a source.
///
/// Implementations must yield images in a stable order; that order becomes
/// the row order of the report.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over decoded images from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image fails to load. The pipeline
    /// skips them without counting them.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}

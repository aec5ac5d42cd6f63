//! Decoded image handed to the analyzer.

use std::ops::Deref;

use image::{DynamicImage, GenericImageView};

/// A decoded image together with the caller's identifier for it.
///
/// The identifier is opaque to the core; it is carried through to the report
/// rows unchanged.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Caller-supplied identifier (file path, catalog name, ...).
    pub id: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading the dimensions from the buffer.
    #[must_use]
    pub fn new(id: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            id: id.into(),
            width,
            height,
            image,
        }
    }

    /// Returns true if the pixel buffer has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let (width, height) = self.image.dimensions();
        width == 0 || height == 0
    }
}

impl Deref for ImageInfo {
    type Target = DynamicImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_new_reads_buffer_dimensions() {
        let info = ImageInfo::new("a.png", DynamicImage::ImageRgb8(RgbImage::new(5, 3)));
        assert_eq!((info.width, info.height), (5, 3));
        assert!(!info.is_empty());
    }

    #[test]
    fn test_is_empty_ignores_stale_dimensions() {
        let mut info = ImageInfo::new("b.png", DynamicImage::ImageRgb8(RgbImage::new(0, 4)));
        info.width = 4;
        assert!(info.is_empty());
    }
}

//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use img_triage_core::domain::ImageInfo;

/// Builder for creating synthetic test images.
///
/// Everything except [`SyntheticImageBuilder::luma_only`] is 8-bit RGB, the
/// layout the analyzer accepts.
pub struct SyntheticImageBuilder;

/// Builds an RGB image with identical channels from a gray-level function.
fn neutral(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = f(x, y);
        Rgb([v, v, v])
    })
}

fn info(id: &str, img: RgbImage) -> ImageInfo {
    ImageInfo::new(id, DynamicImage::ImageRgb8(img))
}

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a high-contrast checkerboard pattern (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> ImageInfo {
        let cell = cell_size.max(1);
        let img = neutral(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                255
            } else {
                0
            }
        });
        info("synthetic://checkerboard", img)
    }

    /// Creates vertical bars pattern (sharp edges).
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32) -> ImageInfo {
        let bar = bar_width.max(1);
        let img = neutral(width, height, |x, _| if (x / bar) % 2 == 0 { 255 } else { 0 });
        info("synthetic://vertical_bars", img)
    }

    // === Blurry Images ===

    /// Creates a uniform gray image (no edges, simulates severe blur).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        info("synthetic://uniform_gray", neutral(width, height, |_, _| value))
    }

    /// Creates a smooth horizontal gradient (low Laplacian energy).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> ImageInfo {
        let img = neutral(width, height, |x, _| {
            ((u32::from(u8::MAX) * x) / width.max(1)) as u8
        });
        info("synthetic://horizontal_gradient", img)
    }

    // === Exposure Images ===

    /// Creates a completely black image (severely underexposed).
    #[must_use]
    pub fn underexposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 0)
    }

    /// Creates a very dark image with slight variation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dark_image(width: u32, height: u32, max_brightness: u8) -> ImageInfo {
        let img = neutral(width, height, |x, y| {
            ((x + y) % u32::from(max_brightness.max(1))) as u8
        });
        info("synthetic://dark", img)
    }

    /// Creates a completely white image (severely overexposed).
    #[must_use]
    pub fn overexposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a very bright image with slight variation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn bright_image(width: u32, height: u32, min_brightness: u8) -> ImageInfo {
        let range = 255 - min_brightness;
        let img = neutral(width, height, |x, y| {
            min_brightness + ((x + y) % u32::from(range.max(1))) as u8
        });
        info("synthetic://bright", img)
    }

    /// Creates a well-exposed middle-gray image.
    #[must_use]
    pub fn well_exposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 128)
    }

    // === Colour Images ===

    /// Creates a uniform RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
        info("synthetic://rgb_uniform", img)
    }

    /// Creates a saturated two-axis colour ramp (clearly not grayscale).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_ramp(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = ((255 * x) / width.max(1)) as u8;
            let g = ((255 * y) / height.max(1)) as u8;
            Rgb([r, g, 255 - r / 2])
        });
        info("synthetic://color_ramp", img)
    }

    /// Creates a sharp, mid-brightness, colourful checkerboard that raises
    /// no flag under the default thresholds.
    #[must_use]
    pub fn color_checkerboard(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([240, 200, 40])
            } else {
                Rgb([40, 40, 200])
            }
        });
        info("synthetic://color_checkerboard", img)
    }

    /// Creates a checkerboard tinted by constant per-channel offsets.
    ///
    /// Channel differences are constant for `offset <= 20`, so it should be
    /// detected as grayscale. Larger offsets clip the dark cells.
    #[must_use]
    pub fn color_cast_checkerboard(width: u32, height: u32, offset: u8) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v: u8 = if (x / 8 + y / 8) % 2 == 0 { 200 } else { 20 };
            Rgb([v.saturating_add(offset), v, v.saturating_sub(offset)])
        });
        info("synthetic://color_cast", img)
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(r: u8, g: u8, b: u8) -> ImageInfo {
        info("synthetic://1x1", RgbImage::from_pixel(1, 1, Rgb([r, g, b])))
    }

    /// Creates a single-channel image, which the analyzer rejects.
    #[must_use]
    pub fn luma_only(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_pixel(width, height, Luma([value]));
        ImageInfo::new("synthetic://luma", DynamicImage::ImageLuma8(img))
    }

    /// Returns `image` with a different identifier.
    #[must_use]
    pub fn named(id: &str, image: ImageInfo) -> ImageInfo {
        ImageInfo { id: id.into(), ..image }
    }
}

/// Convenience functions for common test images.
impl SyntheticImageBuilder {
    /// Returns a standard sharp test image (128x128 checkerboard).
    #[must_use]
    pub fn sharp_image() -> ImageInfo {
        Self::checkerboard(128, 128)
    }

    /// Returns a standard blurry test image (128x128 uniform gray).
    #[must_use]
    pub fn blurry_image() -> ImageInfo {
        Self::uniform_gray(128, 128, 128)
    }

    /// Returns a standard underexposed test image (128x128 black).
    #[must_use]
    pub fn underexposed_image() -> ImageInfo {
        Self::underexposed(128, 128)
    }

    /// Returns a standard overexposed test image (128x128 white).
    #[must_use]
    pub fn overexposed_image() -> ImageInfo {
        Self::overexposed(128, 128)
    }
}

//! Luminance plane and exposure statistics.
//!
//! Brightness and contrast are the mean and population standard deviation of
//! the Rec. 601 luminance plane, computed from a 256-bin histogram.

use image::{GrayImage, Luma, RgbImage};

/// Rec. 601 weights in 14-bit fixed point; they sum to `1 << 14`.
const WEIGHT_R: u32 = 4899;
const WEIGHT_G: u32 = 9617;
const WEIGHT_B: u32 = 1868;
const SHIFT: u32 = 14;

/// Converts an RGB image to its 8-bit luminance plane.
///
/// Uses `0.299 R + 0.587 G + 0.114 B` in 14-bit fixed point, rounded half up.
/// Pixels with equal channels map to the same value exactly.
#[must_use]
pub fn luminance(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let weighted =
            u32::from(r) * WEIGHT_R + u32::from(g) * WEIGHT_G + u32::from(b) * WEIGHT_B;
        // Max is (255 << 14) + (1 << 13), so the shifted value always fits in u8
        #[allow(clippy::cast_possible_truncation)]
        let value = ((weighted + (1 << (SHIFT - 1))) >> SHIFT) as u8;
        Luma([value])
    })
}

/// 256-bin histogram of luminance values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from grayscale image.
    #[must_use]
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut bins = [0u64; 256];
        for pixel in image.pixels() {
            bins[usize::from(pixel.0[0])] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the count for one luminance value.
    #[must_use]
    pub const fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Calculate mean luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Calculate population standard deviation of luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let variance: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64);
        variance.sqrt()
    }
}

/// Brightness and contrast of a luminance plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureStats {
    /// Mean luminance.
    pub brightness: f64,
    /// Population standard deviation of luminance.
    pub contrast: f64,
}

impl ExposureStats {
    /// Measure exposure of a luminance plane.
    #[must_use]
    pub fn measure(luma: &GrayImage) -> Self {
        let histogram = Histogram::from_luma(luma);
        Self {
            brightness: histogram.mean(),
            contrast: histogram.std_dev(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_luminance_gray_is_identity() {
        for v in [0u8, 1, 64, 128, 200, 254, 255] {
            let img = RgbImage::from_pixel(3, 2, Rgb([v, v, v]));
            let luma = luminance(&img);
            assert!(luma.pixels().all(|p| p.0[0] == v), "value {v}");
        }
    }

    #[test]
    fn test_luminance_weights() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let luma = luminance(&img);
        // 0.299 * 255 = 76.245, 0.587 * 255 = 149.685, 0.114 * 255 = 29.07
        assert_eq!(luma.get_pixel(0, 0).0[0], 76);
        assert_eq!(luma.get_pixel(1, 0).0[0], 150);
        assert_eq!(luma.get_pixel(2, 0).0[0], 29);
    }

    #[test]
    fn test_luminance_fixed_point_rounding() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([0, 27, 225]),
            1 => Rgb([240, 200, 40]),
            _ => Rgb([40, 40, 200]),
        });
        let luma = luminance(&img);
        // 41.499 with exact weights, 41.501 with the 14-bit ones
        assert_eq!(luma.get_pixel(0, 0).0[0], 42);
        assert_eq!(luma.get_pixel(1, 0).0[0], 194);
        assert_eq!(luma.get_pixel(2, 0).0[0], 58);
    }

    #[test]
    fn test_histogram_from_uniform() {
        // Create 256x1 image with all values 0-255
        let img = GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]));
        let hist = Histogram::from_luma(&img);
        assert_eq!(hist.total(), 256);
        for v in 0..=255u8 {
            assert_eq!(hist.count(v), 1);
        }
    }

    #[test]
    fn test_histogram_mean_uniform() {
        let img = GrayImage::from_fn(100, 100, |_, _| Luma([128u8]));
        let hist = Histogram::from_luma(&img);
        assert!((hist.mean() - 128.0).abs() < f64::EPSILON);
        assert!(hist.std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn test_histogram_population_std_dev() {
        // Half 0, half 100: mean 50, population std dev 50
        let img = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 0 } else { 100 }]));
        let stats = ExposureStats::measure(&img);
        assert!((stats.brightness - 50.0).abs() < 1e-9);
        assert!((stats.contrast - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram {
            bins: [0u64; 256],
            total: 0,
        };
        assert!(hist.mean().abs() < f64::EPSILON);
        assert!(hist.std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn test_1x1_image() {
        let img = GrayImage::from_pixel(1, 1, Luma([42u8]));
        let stats = ExposureStats::measure(&img);
        assert!((stats.brightness - 42.0).abs() < f64::EPSILON);
        assert!(stats.contrast.abs() < f64::EPSILON);
    }
}

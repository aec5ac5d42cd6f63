//! Near-grayscale detection.
//!
//! An image is grayscale when the per-pixel difference between adjacent
//! channels is (almost) constant. The spread of the difference is used, not
//! its mean, so a uniform colour cast is not mistaken for neutral gray.

use image::RgbImage;

use super::stats::RunningStats;

/// Population standard deviation of `channel[a] - channel[b]` over all pixels.
///
/// Differences are signed, so `+1` and `-1` are two units apart.
#[must_use]
pub fn channel_spread(image: &RgbImage, a: usize, b: usize) -> f64 {
    image
        .pixels()
        .map(|p| f64::from(i16::from(p.0[a]) - i16::from(p.0[b])))
        .collect::<RunningStats>()
        .std_dev()
}

/// Spreads of `ch0 - ch1` and `ch1 - ch2`.
#[must_use]
pub fn channel_spreads(image: &RgbImage) -> (f64, f64) {
    (channel_spread(image, 0, 1), channel_spread(image, 1, 2))
}

/// Returns true if both adjacent-channel spreads are strictly below `tolerance`.
///
/// A spread of exactly zero always passes, so exact gray is grayscale even
/// with a zero tolerance.
#[must_use]
pub fn is_grayscale(image: &RgbImage, tolerance: f64) -> bool {
    let within = |spread: f64| spread == 0.0 || spread < tolerance;
    let (first, second) = channel_spreads(image);
    within(first) && within(second)
}

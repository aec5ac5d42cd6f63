//! Per-image quality verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality flags and raw metrics computed for a single image.
///
/// Field order matches the column order of exported reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityVerdict {
    /// Laplacian variance fell below `blur_th`.
    pub blur: bool,
    /// Mean brightness fell below `low_brightness`.
    pub low_brightness: bool,
    /// Mean brightness exceeded `high_brightness`.
    pub high_brightness: bool,
    /// Both inter-channel difference spreads fell below `grayscale_tol`.
    pub grayscale: bool,
    /// Mean luminance (0-255).
    pub brightness: f64,
    /// Population standard deviation of luminance.
    pub contrast: f64,
    /// Variance of the Laplacian of the luminance plane.
    pub blur_score: f64,
}

impl QualityVerdict {
    /// Returns true if any quality flag is set.
    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        self.blur || self.low_brightness || self.high_brightness || self.grayscale
    }

    /// Translates the set flags into labels, in a fixed order.
    #[must_use]
    pub fn labels(&self) -> Vec<QualityLabel> {
        [
            (self.blur, QualityLabel::Blurry),
            (self.low_brightness, QualityLabel::Dark),
            (self.high_brightness, QualityLabel::Bright),
            (self.grayscale, QualityLabel::Grayscale),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// Named label for a raised quality flag.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    /// Image failed the sharpness check.
    Blurry,
    /// Image is underexposed.
    Dark,
    /// Image is overexposed.
    Bright,
    /// Image carries no meaningful chroma.
    Grayscale,
}

impl QualityLabel {
    /// Returns the label's tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blurry => "blurry",
            Self::Dark => "dark",
            Self::Bright => "bright",
            Self::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Threshold configuration for a batch.

use serde::{Deserialize, Serialize};

use crate::error::QualityError;

/// Thresholds applied to the raw metrics of every image in a batch.
///
/// Construct once per run and call [`QualityConfig::validate`] (or build an
/// [`Analyzer`](crate::Analyzer)) before processing any image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Laplacian variance cutoff. Scores below this are flagged blurry.
    pub blur_th: f64,
    /// Mean brightness floor (0-255). Images below are flagged dark.
    pub low_brightness: f64,
    /// Mean brightness ceiling (0-255). Images above are flagged bright.
    pub high_brightness: f64,
    /// Maximum inter-channel difference spread for an image to count as grayscale.
    pub grayscale_tol: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            blur_th: 100.0,
            low_brightness: 60.0,
            high_brightness: 200.0,
            grayscale_tol: 2.0,
        }
    }
}

impl QualityConfig {
    /// Checks that every threshold is a finite, non-negative number.
    ///
    /// No ordering between `low_brightness` and `high_brightness` is enforced.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<(), QualityError> {
        let fields = [
            ("blur_th", self.blur_th),
            ("low_brightness", self.low_brightness),
            ("high_brightness", self.high_brightness),
            ("grayscale_tol", self.grayscale_tol),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(QualityError::invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(QualityError::invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Returns true if the brightness window is inverted or empty.
    #[must_use]
    pub fn brightness_window_inverted(&self) -> bool {
        self.low_brightness >= self.high_brightness
    }
}

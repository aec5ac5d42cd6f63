//! Per-image quality analysis.

use image::DynamicImage;

use crate::domain::{ImageInfo, QualityConfig, QualityVerdict};
use crate::error::QualityError;
use crate::modules::{blur, exposure, grayscale};

/// Analyzes one image against the given thresholds.
///
/// Pure and deterministic: the same image and configuration always produce
/// the same verdict, and nothing is logged or cached.
///
/// # Errors
///
/// Returns [`QualityError::InvalidInput`] if the configuration is invalid, the
/// image is empty, or the image is not 8-bit three-channel RGB. Hosts holding
/// other layouts should convert with [`DynamicImage::into_rgb8`] first.
pub fn analyze(image: &ImageInfo, config: &QualityConfig) -> Result<QualityVerdict, QualityError> {
    config.validate()?;
    analyze_unchecked(image, config)
}

fn analyze_unchecked(
    image: &ImageInfo,
    config: &QualityConfig,
) -> Result<QualityVerdict, QualityError> {
    let DynamicImage::ImageRgb8(rgb) = &image.image else {
        return Err(QualityError::invalid(format!(
            "{}: expected 8-bit 3-channel image, got {:?} ({} channels)",
            image.id,
            image.color(),
            image.color().channel_count()
        )));
    };
    // The buffer is authoritative; `width`/`height` are caller-editable
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(QualityError::invalid(format!(
            "{}: image is empty ({width}x{height})",
            image.id
        )));
    }

    let luma = exposure::luminance(rgb);
    let exposure = exposure::ExposureStats::measure(&luma);
    let blur_score = blur::laplacian_variance(&luma);

    Ok(QualityVerdict {
        blur: blur_score < config.blur_th,
        low_brightness: exposure.brightness < config.low_brightness,
        high_brightness: exposure.brightness > config.high_brightness,
        grayscale: grayscale::is_grayscale(rgb, config.grayscale_tol),
        brightness: exposure.brightness,
        contrast: exposure.contrast,
        blur_score,
    })
}

/// Analyzer bound to a validated configuration.
///
/// Validation happens once in [`Analyzer::new`], so a misconfigured batch
/// fails before any image is touched. `Analyzer` is `Send + Sync` and can be
/// shared across worker threads.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    config: QualityConfig,
}

impl Analyzer {
    /// Validates `config` and builds an analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::InvalidInput`] if any threshold is invalid.
    pub fn new(config: QualityConfig) -> Result<Self, QualityError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the analyzer configuration.
    #[must_use]
    pub const fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Analyzes one image.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::InvalidInput`] for empty or non-RGB8 images.
    pub fn analyze(&self, image: &ImageInfo) -> Result<QualityVerdict, QualityError> {
        analyze_unchecked(image, &self.config)
    }
}

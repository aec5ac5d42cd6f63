//! Metric calculators.
//!
//! Each module computes one family of raw signals from a decoded image. The
//! [`analyzer`](crate::analyzer) combines them with the thresholds.

pub mod blur;
pub mod exposure;
pub mod grayscale;
pub mod stats;

pub use blur::{laplacian_responses, laplacian_variance};
pub use exposure::{luminance, ExposureStats, Histogram};
pub use grayscale::{channel_spread, channel_spreads, is_grayscale};
pub use stats::RunningStats;

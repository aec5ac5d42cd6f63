//! Test support utilities for img-triage.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the analysis pipeline.
//!
//! # Example
//!
//! ```
//! use img_triage_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // Create synthetic test images
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let blurry = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![sharp, blurry]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockReportSink, MockTagSink};

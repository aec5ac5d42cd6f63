//! Error types raised by the analysis core.

use thiserror::Error;

/// Errors returned synchronously by [`analyze`](crate::analyze).
///
/// The core never retries or recovers; callers decide whether to skip the
/// image or abort the batch.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    /// The image or configuration violates the analyzer's input contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl QualityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

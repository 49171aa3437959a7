//! Error types for detfilter.

use thiserror::Error;

/// Result alias for detfilter operations.
pub type DetFilterResult<T> = std::result::Result<T, DetFilterError>;

/// Errors that can occur when filtering detections.
#[derive(Debug, Error, PartialEq)]
pub enum DetFilterError {
    /// Two collections that must be co-indexed have different lengths.
    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// A box buffer was described with a row width other than 4.
    #[error("invalid box width: expected 4 coordinates per box, got {width}")]
    InvalidBoxWidth { width: usize },
    /// A flat coordinate buffer does not split into whole boxes.
    #[error("box buffer of length {len} is not a multiple of 4")]
    RaggedBoxBuffer { len: usize },
    /// An index lies outside a collection.
    #[error("index {index} out of bounds for {context} (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// A configuration value was rejected.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

//! Shared utility helpers.

pub mod error;

pub use error::{DetFilterError, DetFilterResult};

/// Fails with [`DetFilterError::ShapeMismatch`] when `got != expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, got: usize) -> DetFilterResult<()> {
    if expected != got {
        return Err(DetFilterError::ShapeMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

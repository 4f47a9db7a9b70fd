//! Error types for boxnms.

use thiserror::Error;

/// Result alias for boxnms operations.
pub type BoxNmsResult<T> = std::result::Result<T, BoxNmsError>;

/// Errors that can occur when running a suppression pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoxNmsError {
    /// Index-aligned input slices have different lengths.
    #[error("input length mismatch: {context} has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Which input slice disagrees with `bboxes`.
        context: &'static str,
        /// Number of boxes.
        expected: usize,
        /// Length of the mismatched slice.
        got: usize,
    },
}

/// Fails fast when a per-box slice does not line up with the box list.
pub(crate) fn check_aligned(
    context: &'static str,
    expected: usize,
    got: usize,
) -> BoxNmsResult<()> {
    if expected != got {
        return Err(BoxNmsError::LengthMismatch {
            context,
            expected,
            got,
        });
    }
    Ok(())
}

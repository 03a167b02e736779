//! Error types for tenfold.
//!
//! Only safe view construction is fallible at runtime; precondition
//! violations inside the operation pipeline are programming errors and
//! abort with a panic diagnostic instead.

use thiserror::Error;

/// Errors that can occur when constructing views over caller storage.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Lengths and strides must have the same rank.
    #[error("rank mismatch: {lengths} lengths, {strides} strides")]
    RankMismatch { lengths: usize, strides: usize },

    /// Zero-length axes are not representable.
    #[error("axis {dim} has zero length")]
    ZeroLength { dim: usize },

    /// The view reaches outside the backing storage.
    #[error("view reaches element offset {offset} outside storage of {storage} elements")]
    OutOfBounds { offset: i64, storage: usize },
}

//! Error types

/// Errors raised before any numerical work starts
///
/// Only the shape of the input is validated. Singular matrices, slow or
/// oscillating convergence and NaN/Inf propagation are numeric outcomes,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EigenError {
    #[error("Matrix must be square, got {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

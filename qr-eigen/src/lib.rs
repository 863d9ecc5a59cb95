//! # qr-eigen: eigenvalues by unshifted QR iteration
//!
//! Estimates the eigenvalues of a real square matrix by repeatedly factoring
//! the current iterate `A_k = Q_k R_k` with Householder reflections and
//! recombining `A_{k+1} = R_k Q_k`. The iteration stops when no entry moves
//! by more than the tolerance, or after a fixed number of steps, and the
//! diagonal of the last iterate is returned.
//!
//! ```
//! use qr_eigen::{compute_eigenvalues_f64, matrix_from_rows};
//!
//! let a = matrix_from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! let mut ev = compute_eigenvalues_f64(&a).unwrap();
//! ev.sort_by(|x, y| x.partial_cmp(y).unwrap());
//! assert!((ev[0] - 1.0).abs() < 1e-8);
//! assert!((ev[1] - 3.0).abs() < 1e-8);
//! ```
//!
//! Arrays are `mdarray` tensors. All algorithms are generic over
//! [`Precision`], implemented for `f64` and the double-double `TwoFloat`,
//! which carries the iteration to about 30 significant digits.

pub mod eigen;
pub mod error;
pub mod precision;
pub mod qr;
pub mod utils;

pub use eigen::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, QRIterationConfig, QRIterationResult,
    compute_eigenvalues, compute_eigenvalues_f64, qr_iteration,
};
pub use error::EigenError;
pub use precision::Precision;
pub use qr::{HouseholderQR, QRDecomposition, qr_decompose};
pub use utils::{
    allclose, diagonal, identity, is_orthogonal, is_upper_triangular, matmul, matrix_from_rows,
    norm_2, norm_frobenius, norm_max, trace, transpose, validate_qr,
};

// Re-export external dependencies for convenience
pub use mdarray::DTensor;
pub use twofloat::TwoFloat;

/// Dense row-major matrix
pub type Matrix<T = f64> = DTensor<T, 2>;

//! Result validation utilities

use crate::precision::Precision;
use crate::utils::matrix::matmul;
use crate::utils::norms::norm_frobenius;
use mdarray::DTensor;

/// Validate a QR factorization
///
/// Checks that Q is orthogonal, that R is upper triangular, and that
/// `||A - Q*R||_F <= tolerance * max(1, ||A||_F)`.
pub fn validate_qr<T: Precision>(
    original: &DTensor<T, 2>,
    q: &DTensor<T, 2>,
    r: &DTensor<T, 2>,
    tolerance: T,
) -> bool {
    let (m, n) = *original.shape();
    if *q.shape() != (m, m) || *r.shape() != (m, n) {
        return false;
    }

    if !is_orthogonal(q, tolerance) {
        return false;
    }

    if !is_upper_triangular(r, tolerance) {
        return false;
    }

    is_reconstruction_valid(original, q, r, tolerance)
}

/// Check if the columns of a matrix are orthonormal (`Q^T * Q = I`)
pub fn is_orthogonal<T: Precision>(matrix: &DTensor<T, 2>, tolerance: T) -> bool {
    let (rows, k) = *matrix.shape();

    for i in 0..k {
        for j in 0..k {
            let mut sum = T::zero();
            for row in 0..rows {
                sum = sum + matrix[[row, i]] * matrix[[row, j]];
            }
            let expected = if i == j { T::one() } else { T::zero() };
            if !(Precision::abs(sum - expected) <= tolerance) {
                return false;
            }
        }
    }

    true
}

/// Check that everything below the main diagonal is within `tolerance` of zero
pub fn is_upper_triangular<T: Precision>(matrix: &DTensor<T, 2>, tolerance: T) -> bool {
    let (m, n) = *matrix.shape();
    for i in 0..m {
        for j in 0..i.min(n) {
            if !(Precision::abs(matrix[[i, j]]) <= tolerance) {
                return false;
            }
        }
    }
    true
}

fn is_reconstruction_valid<T: Precision>(
    original: &DTensor<T, 2>,
    q: &DTensor<T, 2>,
    r: &DTensor<T, 2>,
    tolerance: T,
) -> bool {
    let (m, n) = *original.shape();
    let qr = matmul(q, r);
    let diff = DTensor::<T, 2>::from_fn([m, n], |idx| {
        original[[idx[0], idx[1]]] - qr[[idx[0], idx[1]]]
    });

    let diff_norm = norm_frobenius(&diff);
    let orig_norm = norm_frobenius(original);
    let scale = if orig_norm > T::one() { orig_norm } else { T::one() };

    diff_norm <= tolerance * scale
}

//! Dense matrix construction and elementwise helpers

use crate::error::EigenError;
use crate::precision::Precision;
use mdarray::DTensor;

/// Build a matrix from a list of rows
///
/// Every row must have the same length as the first one. The result does
/// not have to be square.
pub fn matrix_from_rows<T: Precision>(rows: &[Vec<T>]) -> Result<DTensor<T, 2>, EigenError> {
    let m = rows.len();
    let n = rows.first().map_or(0, Vec::len);

    for (row, values) in rows.iter().enumerate() {
        if values.len() != n {
            return Err(EigenError::RaggedRows {
                row,
                expected: n,
                found: values.len(),
            });
        }
    }

    Ok(DTensor::<T, 2>::from_fn([m, n], |idx| rows[idx[0]][idx[1]]))
}

/// n × n identity matrix
pub fn identity<T: Precision>(n: usize) -> DTensor<T, 2> {
    DTensor::<T, 2>::from_fn([n, n], |idx| {
        if idx[0] == idx[1] { T::one() } else { T::zero() }
    })
}

pub fn transpose<T: Precision>(matrix: &DTensor<T, 2>) -> DTensor<T, 2> {
    let (m, n) = *matrix.shape();
    DTensor::<T, 2>::from_fn([n, m], |idx| matrix[[idx[1], idx[0]]])
}

/// Matrix product `a * b`
///
/// # Panics
/// If the inner dimensions differ.
pub fn matmul<T: Precision>(a: &DTensor<T, 2>, b: &DTensor<T, 2>) -> DTensor<T, 2> {
    let (m, k1) = *a.shape();
    let (k2, n) = *b.shape();
    assert_eq!(
        k1, k2,
        "Matrix dimensions incompatible for multiplication: {}x{} * {}x{}",
        m, k1, k2, n
    );

    DTensor::<T, 2>::from_fn([m, n], |idx| {
        let mut sum = T::zero();
        for l in 0..k1 {
            sum = sum + a[[idx[0], l]] * b[[l, idx[1]]];
        }
        sum
    })
}

/// Main diagonal, in row order
pub fn diagonal<T: Precision>(matrix: &DTensor<T, 2>) -> Vec<T> {
    let (m, n) = *matrix.shape();
    (0..m.min(n)).map(|i| matrix[[i, i]]).collect()
}

/// Sum of the main diagonal
pub fn trace<T: Precision>(matrix: &DTensor<T, 2>) -> T {
    diagonal(matrix)
        .into_iter()
        .fold(T::zero(), |acc, x| acc + x)
}

/// Largest absolute elementwise difference
///
/// NaN entries make the result NaN. Shapes must match.
pub fn max_abs_diff<T: Precision>(a: &DTensor<T, 2>, b: &DTensor<T, 2>) -> T {
    let shape = *a.shape();
    assert_eq!(shape, *b.shape(), "Matrix dimensions must match");

    let (m, n) = shape;
    let mut max_val = T::zero();
    for i in 0..m {
        for j in 0..n {
            let diff = Precision::abs(a[[i, j]] - b[[i, j]]);
            if !Precision::is_finite(diff) {
                return diff;
            }
            if diff > max_val {
                max_val = diff;
            }
        }
    }
    max_val
}

/// True if every entry of `a` is within `tol` (absolute) of the entry of `b`
///
/// Any NaN or infinite difference counts as not close.
pub fn allclose<T: Precision>(a: &DTensor<T, 2>, b: &DTensor<T, 2>, tol: T) -> bool {
    let shape = *a.shape();
    if shape != *b.shape() {
        return false;
    }

    let (m, n) = shape;
    for i in 0..m {
        for j in 0..n {
            let diff = Precision::abs(a[[i, j]] - b[[i, j]]);
            // written so that a NaN diff fails the test
            if !(diff <= tol) {
                return false;
            }
        }
    }
    true
}

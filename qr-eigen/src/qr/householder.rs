//! Householder reflection utilities for QR decomposition
//!
//! A reflector is stored LAPACK style: `H = I - tau * v * v^T` with `v[0] = 1`
//! implied, so only `v[1..]` is kept (in the sub-diagonal part of the packed
//! factor matrix).

use crate::precision::Precision;
use crate::utils::norms::norm_2;
use mdarray::DTensor;
use std::ops::Range;

/// Compute Householder reflection vector and coefficient
///
/// Given a vector x, computes a Householder reflection H = I - τvv^T
/// such that Hx = [β, 0, ..., 0]^T where β = -sign(x0) * ||x||.
///
/// On return `x[0]` holds β and `x[1..]` holds the essential part of v.
/// Returns (τ, β). A zero vector gives τ = 0, i.e. H = I.
pub fn reflector<T: Precision>(x: &mut [T]) -> (T, T) {
    let n = x.len();
    if n == 0 {
        return (T::zero(), T::zero());
    }

    let x0 = x[0];
    let norm_x = norm_2(x);

    if norm_x == T::zero() {
        return (T::zero(), x0);
    }

    // ν carries the sign of x0 so that x0 + ν never cancels
    let nu = if x0 >= T::zero() { norm_x } else { -norm_x };
    let x0_new = x0 + nu;
    x[0] = -nu;

    for xi in x.iter_mut().skip(1) {
        *xi = Precision::quotient(*xi, x0_new);
    }

    let tau = Precision::quotient(x0_new, nu);

    (tau, -nu)
}

/// Apply a Householder reflection from the left
///
/// Computes `A[rows, cols] = H * A[rows, cols]` where `rows` starts at
/// `row_start` and has length `v.len()`. `v[0]` is ignored and treated as 1.
pub fn reflector_apply<T: Precision>(
    v: &[T],
    tau: T,
    a: &mut DTensor<T, 2>,
    row_start: usize,
    cols: Range<usize>,
) {
    if tau == T::zero() {
        return;
    }

    let len = v.len();
    for j in cols {
        // vaj = tau * (A(0, j) + v[1..] . A[1.., j])
        let mut vaj = a[[row_start, j]];
        for l in 1..len {
            vaj = vaj + v[l] * a[[row_start + l, j]];
        }
        vaj = tau * vaj;

        a[[row_start, j]] = a[[row_start, j]] - vaj;
        for l in 1..len {
            a[[row_start + l, j]] = a[[row_start + l, j]] - vaj * v[l];
        }
    }
}

/// Apply a Householder reflection from the right
///
/// Computes `A[rows, cols] = A[rows, cols] * H` where `cols` starts at
/// `col_start` and has length `v.len()`. `v[0]` is ignored and treated as 1.
pub fn reflector_apply_right<T: Precision>(
    v: &[T],
    tau: T,
    a: &mut DTensor<T, 2>,
    col_start: usize,
    rows: Range<usize>,
) {
    if tau == T::zero() {
        return;
    }

    let len = v.len();
    for i in rows {
        let mut aiv = a[[i, col_start]];
        for l in 1..len {
            aiv = aiv + a[[i, col_start + l]] * v[l];
        }
        aiv = tau * aiv;

        a[[i, col_start]] = a[[i, col_start]] - aiv;
        for l in 1..len {
            a[[i, col_start + l]] = a[[i, col_start + l]] - aiv * v[l];
        }
    }
}

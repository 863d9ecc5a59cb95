//! Unshifted QR iteration
//!
//! Starting from `A_0 = A`, each step factors `A_k = Q_k R_k` and forms
//! `A_{k+1} = R_k Q_k`, an orthogonal similarity transform of `A_k`. For
//! matrices whose eigenvalues have distinct magnitudes the iterates approach
//! an upper triangular matrix with the eigenvalues on the diagonal.
//!
//! The loop ends after `max_iterations` steps or as soon as no entry of
//! `A_{k+1}` differs from the matching entry of `A_k` by more than
//! `tolerance`. The comparison is element-wise, not a norm of the difference.
//!
//! No shifts or deflation are applied. Complex-conjugate pairs and
//! eigenvalues of equal magnitude leave 2×2 blocks (or oscillations) on the
//! diagonal; the diagonal is still returned as-is.

use crate::error::EigenError;
use crate::precision::Precision;
use crate::qr::HouseholderQR;
use crate::utils::matrix::{allclose, diagonal, max_abs_diff};
use crate::utils::norms::norm_max;
use mdarray::DTensor;

/// Default cap on the number of QR steps
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default element-wise convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Configuration for the QR iteration
#[derive(Debug, Clone)]
pub struct QRIterationConfig<T: Precision> {
    /// Maximum number of QR steps; zero returns the input diagonal
    pub max_iterations: usize,
    /// Absolute per-entry change below which the iteration has converged.
    /// A value `<= 0` only accepts exact equality.
    pub tolerance: T,
}

impl<T: Precision> QRIterationConfig<T> {
    pub fn new(max_iterations: usize, tolerance: T) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl<T: Precision> Default for QRIterationConfig<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, T::from_f64(DEFAULT_TOLERANCE))
    }
}

/// Outcome of a QR iteration run
#[derive(Debug, Clone)]
pub struct QRIterationResult<T: Precision> {
    /// Diagonal of the final iterate, in diagonal order
    pub eigenvalues: Vec<T>,
    /// Number of QR steps performed
    pub iterations: usize,
    /// Whether the element-wise test passed before the cap
    pub converged: bool,
    /// Final iterate (quasi upper triangular when the run went well)
    pub matrix: DTensor<T, 2>,
}

/// Run the unshifted QR iteration and report how it ended
///
/// The input is copied and never modified. Only squareness is checked;
/// NaN or infinite entries are carried through to the result.
pub fn qr_iteration<T: Precision>(
    matrix: &DTensor<T, 2>,
    config: QRIterationConfig<T>,
) -> Result<QRIterationResult<T>, EigenError> {
    let (rows, cols) = *matrix.shape();
    if rows != cols {
        return Err(EigenError::InvalidShape { rows, cols });
    }

    if config.max_iterations > 0 && config.tolerance > T::zero() {
        let rounding = rounding_level(matrix);
        if config.tolerance < rounding {
            log::warn!(
                target: "qr_eigen",
                "tolerance {} is below the rounding level {} of the iterates; \
                 the run will likely stop at max_iterations",
                config.tolerance,
                rounding
            );
        }
    }

    let mut current = matrix.clone();
    let mut iterations = 0;
    let mut converged = false;
    let mut seen_non_finite = false;

    while iterations < config.max_iterations {
        let next = HouseholderQR::factor_in_place(current.clone()).rq();
        iterations += 1;

        if log::log_enabled!(target: "qr_eigen", log::Level::Trace) {
            log::trace!(
                target: "qr_eigen",
                "QR step {}: max entry change {}",
                iterations,
                max_abs_diff(&next, &current)
            );
        }

        if !seen_non_finite && has_non_finite(&next) {
            seen_non_finite = true;
            log::warn!(
                target: "qr_eigen",
                "QR iteration produced a non-finite entry at step {} (n = {})",
                iterations,
                rows
            );
        }

        let done = allclose(&next, &current, config.tolerance);
        current = next;
        if done {
            converged = true;
            break;
        }
    }

    if converged {
        log::debug!(
            target: "qr_eigen",
            "QR iteration converged after {} steps (n = {}, tolerance = {})",
            iterations,
            rows,
            config.tolerance
        );
    } else if config.max_iterations > 0 {
        log::debug!(
            target: "qr_eigen",
            "QR iteration stopped at max_iterations = {} without converging (n = {})",
            config.max_iterations,
            rows
        );
    }

    Ok(QRIterationResult {
        eigenvalues: diagonal(&current),
        iterations,
        converged,
        matrix: current,
    })
}

/// Eigenvalue estimates of a square matrix
///
/// Returns the diagonal of the last iterate (not sorted). Whether the
/// iteration converged is not reported; use [`qr_iteration`] for that.
///
/// # Errors
/// [`EigenError::InvalidShape`] if the matrix is not square. Nothing is
/// computed in that case.
pub fn compute_eigenvalues<T: Precision>(
    matrix: &DTensor<T, 2>,
    max_iterations: usize,
    tolerance: T,
) -> Result<Vec<T>, EigenError> {
    let result = qr_iteration(matrix, QRIterationConfig::new(max_iterations, tolerance))?;
    Ok(result.eigenvalues)
}

/// [`compute_eigenvalues`] with 1000 iterations and tolerance 1e-10
pub fn compute_eigenvalues_f64(matrix: &DTensor<f64, 2>) -> Result<Vec<f64>, EigenError> {
    compute_eigenvalues(matrix, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE)
}

/// Size of the rounding noise one QR step adds to the entries
pub(crate) fn rounding_level<T: Precision>(matrix: &DTensor<T, 2>) -> T {
    T::epsilon() * norm_max(matrix)
}

fn has_non_finite<T: Precision>(matrix: &DTensor<T, 2>) -> bool {
    let (m, n) = *matrix.shape();
    (0..m).any(|i| (0..n).any(|j| !Precision::is_finite(matrix[[i, j]])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::matrix::{matrix_from_rows, trace};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use twofloat::TwoFloat;

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn test_default_config() {
        let config = QRIterationConfig::<f64>::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tolerance, 1e-10);

        let config = config.with_max_iterations(5).with_tolerance(1e-3);
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.tolerance, 1e-3);
    }

    #[test]
    fn test_zero_iterations_returns_input_diagonal() {
        let a = matrix_from_rows(&[vec![1.5, 2.0], vec![-7.0, 0.25]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::new(0, 1e-10)).unwrap();

        assert_eq!(result.eigenvalues, vec![1.5, 0.25]);
        assert_eq!(result.iterations, 0);
        assert!(!result.converged);
    }

    #[test]
    fn test_one_by_one() {
        let a = matrix_from_rows(&[vec![5.0]]).unwrap();
        for &(iters, tol) in &[(0, 1e-10), (1, 1e-10), (1000, 1e-10), (10, 0.0), (10, -1.0)] {
            assert_eq!(compute_eigenvalues(&a, iters, tol).unwrap(), vec![5.0]);
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let a = DTensor::<f64, 2>::from_fn([2, 3], |_| 1.0);
        let err = compute_eigenvalues(&a, 10, 1e-10).unwrap_err();
        assert_eq!(err, EigenError::InvalidShape { rows: 2, cols: 3 });
    }

    #[test]
    fn test_input_not_modified() {
        let a = matrix_from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let before = a.clone();
        let _ = compute_eigenvalues_f64(&a).unwrap();
        assert!(allclose(&a, &before, 0.0));
    }

    #[test]
    fn test_diagonal_matrix_converges_immediately() {
        let a = matrix_from_rows(&[
            vec![3.0, 0.0, 0.0],
            vec![0.0, -1.0, 0.0],
            vec![0.0, 0.0, 0.5],
        ])
        .unwrap();
        let result = qr_iteration(&a, QRIterationConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.eigenvalues, vec![3.0, -1.0, 0.5]);
    }

    #[test]
    fn test_symmetric_two_by_two() {
        let a = matrix_from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::default()).unwrap();

        assert!(result.converged);
        assert!(result.iterations < 100);
        let ev = sorted(result.eigenvalues);
        assert_abs_diff_eq!(ev[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ev[1], 3.0, epsilon = 1e-9);
        // largest eigenvalue settles first on the diagonal
        assert_abs_diff_eq!(result.matrix[[0, 0]], 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.matrix[[1, 0]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap_reported() {
        let a = matrix_from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::new(1, 1e-10)).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_orthogonal_matrix_is_fixed_point() {
        // a rotation factors as Q = -A, R = -I, so R Q = A
        let a = matrix_from_rows(&[vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::new(50, 1e-10)).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!(allclose(&result.matrix, &a, 1e-15));
    }

    #[test]
    fn test_complex_pair_keeps_trace() {
        // eigenvalues 1 +- i*sqrt(2): the diagonal is not an eigenvalue estimate
        let a = matrix_from_rows(&[vec![1.0, -2.0], vec![1.0, 1.0]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::new(200, 1e-10)).unwrap();

        assert!(result.iterations <= 200);
        assert_eq!(result.eigenvalues.len(), 2);
        assert_abs_diff_eq!(
            result.eigenvalues[0] + result.eigenvalues[1],
            trace(&a),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nan_propagates() {
        let a = matrix_from_rows(&[vec![1.0, f64::NAN], vec![0.0, 2.0]]).unwrap();
        let result = qr_iteration(&a, QRIterationConfig::new(5, 1e-10)).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
        assert!(result.eigenvalues.iter().any(|x| x.is_nan()));
    }

    #[test]
    fn test_empty_matrix() {
        let a = DTensor::<f64, 2>::from_fn([0, 0], |_| 0.0);
        let result = qr_iteration(&a, QRIterationConfig::default()).unwrap();
        assert!(result.eigenvalues.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn test_rounding_level() {
        let a = matrix_from_rows(&[vec![1.0, -4.0], vec![2.0, 0.5]]).unwrap();
        assert_eq!(rounding_level(&a), 4.0 * f64::EPSILON);

        let b = DTensor::<TwoFloat, 2>::from_fn([2, 2], |idx| TwoFloat::from(a[[idx[0], idx[1]]]));
        let level = rounding_level(&b);
        assert!(level > TwoFloat::from(0.0));
        assert!(level < TwoFloat::from(1e-30));
    }

    #[test]
    fn test_large_entries_do_not_overflow() {
        let a = matrix_from_rows(&[vec![3e200, 1e200], vec![1e200, 3e200]]).unwrap();
        let ev = sorted(compute_eigenvalues(&a, 1000, 1e-10).unwrap());

        assert!(ev.iter().all(|x| x.is_finite()));
        assert_relative_eq!(ev[0], 2e200, max_relative = 1e-12);
        assert_relative_eq!(ev[1], 4e200, max_relative = 1e-12);
    }

    #[test]
    fn test_twofloat_iteration() {
        let rows = [[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let a = DTensor::<TwoFloat, 2>::from_fn([3, 3], |idx| {
            TwoFloat::from(rows[idx[0]][idx[1]])
        });

        let config = QRIterationConfig::new(2000, TwoFloat::from(1e-25));
        let result = qr_iteration(&a, config).unwrap();
        assert!(result.converged);

        // eigenvalues of this matrix are 3 + sqrt(3), 3 and 3 - sqrt(3),
        // which unshifted QR leaves in that order
        let three = TwoFloat::from(3.0);
        let s3 = Precision::sqrt(three);
        let expected = [three + s3, three, three - s3];
        for (&x, &e) in result.eigenvalues.iter().zip(expected.iter()) {
            let err = Precision::abs(x - e);
            assert!(err < TwoFloat::from(1e-26), "|{} - {}| = {}", x, e, err);
        }
    }
}

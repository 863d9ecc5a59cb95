//! Householder QR decomposition of square matrices

use super::householder::{reflector, reflector_apply, reflector_apply_right};
use crate::error::EigenError;
use crate::precision::Precision;
use mdarray::DTensor;

/// Packed Householder QR factorization of a square matrix
///
/// The upper triangle of `factors` holds R. Below the diagonal, column `i`
/// holds the essential part of the i-th reflector `H_i`, and `Q = H_0 H_1 ...
/// H_{n-1}`.
#[derive(Debug, Clone)]
pub struct HouseholderQR<T: Precision> {
    /// Packed QR factorization (Q and R stored together)
    pub factors: DTensor<T, 2>,
    /// Householder reflection coefficients
    pub taus: Vec<T>,
}

/// Explicit factors of `A = Q * R`
#[derive(Debug, Clone)]
pub struct QRDecomposition<T: Precision> {
    /// Orthogonal factor (n × n)
    pub q: DTensor<T, 2>,
    /// Upper triangular factor (n × n)
    pub r: DTensor<T, 2>,
}

impl<T: Precision> HouseholderQR<T> {
    /// Factor a square matrix
    ///
    /// The input is copied; singular and zero matrices factor fine and give
    /// zeros on the diagonal of R.
    pub fn new(matrix: &DTensor<T, 2>) -> Result<Self, EigenError> {
        let (rows, cols) = *matrix.shape();
        if rows != cols {
            return Err(EigenError::InvalidShape { rows, cols });
        }
        Ok(Self::factor_in_place(matrix.clone()))
    }

    /// Factor an owned square matrix without copying it
    ///
    /// Callers must have checked squareness.
    pub(crate) fn factor_in_place(mut factors: DTensor<T, 2>) -> Self {
        let n = factors.shape().0;
        let mut taus = vec![T::zero(); n];

        for i in 0..n {
            // Extract column i from row i onwards
            let mut col_i: Vec<T> = (i..n).map(|row| factors[[row, i]]).collect();
            let (tau_i, _) = reflector(&mut col_i);
            taus[i] = tau_i;

            // Write back beta and the essential part of v
            for (offset, &val) in col_i.iter().enumerate() {
                factors[[i + offset, i]] = val;
            }

            if i + 1 < n {
                reflector_apply(&col_i, tau_i, &mut factors, i, i + 1..n);
            }
        }

        Self { factors, taus }
    }

    pub fn size(&self) -> usize {
        self.taus.len()
    }

    /// Essential part of reflector `i`, padded with a leading placeholder
    fn reflector_vector(&self, i: usize) -> Vec<T> {
        let n = self.size();
        let mut v = Vec::with_capacity(n - i);
        v.push(T::one());
        v.extend((i + 1..n).map(|row| self.factors[[row, i]]));
        v
    }

    /// Compute the Q matrix
    ///
    /// Reflectors are accumulated backwards, `Q = H_0 (H_1 (... (H_{n-1} I)))`,
    /// so each step only touches the trailing block.
    pub fn q(&self) -> DTensor<T, 2> {
        let n = self.size();
        let mut q = DTensor::<T, 2>::from_fn([n, n], |idx| {
            if idx[0] == idx[1] { T::one() } else { T::zero() }
        });

        for i in (0..n).rev() {
            let tau = self.taus[i];
            if tau != T::zero() {
                let v = self.reflector_vector(i);
                reflector_apply(&v, tau, &mut q, i, i..n);
            }
        }

        q
    }

    /// Compute the R matrix
    ///
    /// Extracts the upper triangle of the packed factors; the strictly lower
    /// part is zero.
    pub fn r(&self) -> DTensor<T, 2> {
        let n = self.size();
        DTensor::<T, 2>::from_fn([n, n], |idx| {
            if idx[1] >= idx[0] {
                self.factors[[idx[0], idx[1]]]
            } else {
                T::zero()
            }
        })
    }

    /// Recombine the factors in reverse order, `R * Q`
    ///
    /// Applies the reflectors to R from the right, `R H_0 H_1 ... H_{n-1}`,
    /// without forming Q.
    pub fn rq(&self) -> DTensor<T, 2> {
        let n = self.size();
        let mut rq = self.r();

        for i in 0..n {
            let tau = self.taus[i];
            if tau != T::zero() {
                let v = self.reflector_vector(i);
                reflector_apply_right(&v, tau, &mut rq, i, 0..n);
            }
        }

        rq
    }

    pub fn into_decomposition(self) -> QRDecomposition<T> {
        QRDecomposition {
            q: self.q(),
            r: self.r(),
        }
    }
}

/// QR decomposition `A = Q * R` of a square matrix
///
/// Q is orthogonal and R upper triangular, both n × n. Fails only with
/// [`EigenError::InvalidShape`] for non-square input.
pub fn qr_decompose<T: Precision>(
    matrix: &DTensor<T, 2>,
) -> Result<QRDecomposition<T>, EigenError> {
    Ok(HouseholderQR::new(matrix)?.into_decomposition())
}

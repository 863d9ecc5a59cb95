//! Vector and matrix norm computations
//!
//! The 2-norm and Frobenius norm rescale by a power of two when the largest
//! entry is outside `[SMALL, BIG]`, so squaring can neither overflow nor
//! underflow. Power-of-two scaling is exact, and inputs in the normal range
//! are summed unscaled.

use crate::precision::Precision;
use mdarray::DTensor;

const BIG: f64 = 1e150;
const SMALL: f64 = 1e-150;

/// Compute the 2-norm (Euclidean norm) of a vector
pub fn norm_2<T: Precision>(vec: &[T]) -> T {
    scaled_sum_of_squares(vec.iter().copied())
}

/// Compute the Frobenius norm of a matrix
pub fn norm_frobenius<T: Precision>(mat: &DTensor<T, 2>) -> T {
    let (m, n) = *mat.shape();
    scaled_sum_of_squares((0..m).flat_map(|i| (0..n).map(move |j| mat[[i, j]])))
}

fn scaled_sum_of_squares<T: Precision, I>(values: I) -> T
where
    I: Iterator<Item = T> + Clone,
{
    let mut max_abs = T::zero();
    for val in values.clone() {
        let a = Precision::abs(val);
        if a > max_abs {
            max_abs = a;
        }
    }

    let (down, up) = power_of_two_scale(Precision::to_f64(max_abs));
    let down = T::from_f64(down);

    let mut sum = T::zero();
    for val in values {
        let scaled = val * down;
        sum = sum + scaled * scaled;
    }
    Precision::sqrt(sum) * T::from_f64(up)
}

/// `(2^-e, 2^e)` with `2^e` close to `max_abs`, or `(1, 1)` when no scaling
/// is needed
fn power_of_two_scale(max_abs: f64) -> (f64, f64) {
    if !max_abs.is_finite() || max_abs == 0.0 || (SMALL..=BIG).contains(&max_abs) {
        return (1.0, 1.0);
    }
    let e = (max_abs.log2().floor() as i64).clamp(-1000, 1000);
    let pow2 = |k: i64| f64::from_bits(((1023 + k) as u64) << 52);
    (pow2(-e), pow2(e))
}

/// Compute the maximum absolute value in a matrix
pub fn norm_max<T: Precision>(mat: &DTensor<T, 2>) -> T {
    let (m, n) = *mat.shape();
    let mut max_val = T::zero();
    for i in 0..m {
        for j in 0..n {
            let abs_val = Precision::abs(mat[[i, j]]);
            if abs_val > max_val {
                max_val = abs_val;
            }
        }
    }
    max_val
}

//! Scalar types the QR algorithms can run on
//!
//! The decomposition and the iteration only need field arithmetic, ordering,
//! `abs` and `sqrt`, so they are written against [`Precision`] instead of a
//! concrete float. Implemented for `f64` and for the double-double
//! [`TwoFloat`], which roughly doubles the number of significant digits.
//! Divisions go through [`Precision::quotient`] so the double-double path
//! keeps its full precision.

use std::fmt::{Debug, Display};
use twofloat::TwoFloat;

/// Numeric trait for the scalar type of a matrix
pub trait Precision:
    Copy
    + Debug
    + Display
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
{
    /// Convert from f64 to Self
    fn from_f64(x: f64) -> Self;

    /// Convert to f64 (rounding if Self is wider)
    fn to_f64(self) -> f64;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Machine epsilon
    fn epsilon() -> Self;

    /// Absolute value
    fn abs(self) -> Self;

    /// Square root
    fn sqrt(self) -> Self;

    /// Neither NaN nor infinite
    fn is_finite(self) -> bool;

    /// `self / rhs` to the full working precision of Self
    #[inline]
    fn quotient(self, rhs: Self) -> Self {
        self / rhs
    }
}

impl Precision for f64 {
    #[inline]
    fn from_f64(x: f64) -> Self {
        x
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    fn epsilon() -> Self {
        f64::EPSILON
    }

    #[inline]
    fn abs(self) -> Self {
        self.abs()
    }

    #[inline]
    fn sqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.is_finite()
    }
}

impl Precision for TwoFloat {
    #[inline]
    fn from_f64(x: f64) -> Self {
        TwoFloat::from(x)
    }

    fn to_f64(self) -> f64 {
        self.hi() + self.lo()
    }

    #[inline]
    fn zero() -> Self {
        TwoFloat::from(0.0)
    }

    #[inline]
    fn one() -> Self {
        TwoFloat::from(1.0)
    }

    // Unit roundoff of a double-double is about eps^2, but the guaranteed
    // accuracy of the basic operations is closer to 4 eps^2.
    fn epsilon() -> Self {
        TwoFloat::from(4.0 * f64::EPSILON * f64::EPSILON)
    }

    #[inline]
    fn abs(self) -> Self {
        double_double::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        double_double::sqrt(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.is_valid()
    }

    // twofloat's `/` forms its residual without FMA and only reaches f64
    // accuracy, so divide by the leading word and correct twice.
    fn quotient(self, rhs: Self) -> Self {
        let d = rhs.hi();
        let q0 = self.hi() / d;
        let r = self - rhs * q0;
        let q1 = r.hi() / d;
        let r = r - rhs * q1;
        let q2 = r.hi() / d;
        TwoFloat::new_add(q0, q1) + q2
    }
}

// Kept out of scope of `Precision` so method calls resolve to the inherent
// `TwoFloat` functions.
mod double_double {
    use twofloat::TwoFloat;

    #[inline]
    pub(super) fn abs(x: TwoFloat) -> TwoFloat {
        x.abs()
    }

    #[inline]
    pub(super) fn sqrt(x: TwoFloat) -> TwoFloat {
        x.sqrt()
    }
}

//! Floating-point abstraction so the cloth core runs on `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar operations the force model, integrators and step controller need.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the crate stays `no_std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// `self` raised to the power `exp`.
    fn powf(self, exp: Self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Ceiling.
    fn ceil(self) -> Self;
    /// `false` for NaN and the infinities.
    fn is_finite(self) -> bool;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Widen to f64 (for step counts and reporting).
    fn to_f64(self) -> f64;

    /// Minimum of two values.
    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Maximum of two values.
    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    /// Convert a count (grid index, step count) into a scalar.
    fn from_usize(v: usize) -> Self {
        Self::from_f32(v as f32)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn powf(self, exp: Self) -> Self { libm::powf(self, exp) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn ceil(self) -> Self { libm::ceilf(self) }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn from_f32(v: f32) -> Self { v }
    fn to_f64(self) -> f64 { self as f64 }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn powf(self, exp: Self) -> Self { libm::pow(self, exp) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn ceil(self) -> Self { libm::ceil(self) }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn to_f64(self) -> f64 { self }

    fn from_usize(v: usize) -> Self { v as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powf_matches_fractional_root() {
        let r: f64 = Float::powf(32.0, 1.0 / 5.0);
        assert!((r - 2.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_values_detected() {
        assert!(!Float::is_finite(f32::NAN));
        assert!(!Float::is_finite(f64::INFINITY));
        assert!(Float::is_finite(1.5f32));
    }
}

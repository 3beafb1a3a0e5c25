use std::ops::*;

mod f32;
mod f64;

/// Generic float numbers representation.
///
/// Every value stored in or computed by a network (weights, biases,
/// activations, gradients) uses this type, so precision of the whole
/// engine is selected by choosing the float type of the network.
pub trait Float:
    Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self> +
    AddAssign + SubAssign + MulAssign + DivAssign + Neg<Output = Self> +
    Default + Clone + Copy + PartialEq + PartialOrd + std::fmt::Debug + std::fmt::Display +
    Send + Sync + Sized + 'static
{
    /// Constant equal to `Self::from_float(0.0)`.
    const ZERO: Self;

    /// Constant equal to `Self::from_float(0.5)`.
    const HALF: Self;

    /// Constant equal to `Self::from_float(1.0)`.
    const ONE: Self;

    /// Machine epsilon value.
    ///
    /// This is the difference between 1.0 and the next
    /// larger representable number.
    const EPSILON: Self;

    /// Represent current float as machine f32.
    fn as_f32(&self) -> f32;

    /// Represent current float as machine f64 (double precision).
    fn as_f64(&self) -> f64;

    /// Convert given float to another type.
    fn from_float<F: Float>(float: F) -> Self;

    // =================================== Arithmetic functions ===================================

    /// Returns true if this number is neither infinite nor NaN.
    fn is_finite(&self) -> bool {
        self.as_f64().is_finite()
    }

    /// Computes the absolute value of self.
    fn abs(&self) -> Self {
        Self::from_float(self.as_f64().abs())
    }

    /// Raises a number to an integer power.
    fn powi(&self, n: i32) -> Self {
        Self::from_float(self.as_f64().powi(n))
    }

    /// Calculate `e^(self)`.
    fn exp(&self) -> Self {
        Self::from_float(self.as_f64().exp())
    }
}

#[test]
/// Conversions between supported float types keep simple values exact.
fn test_float_conversions() {
    assert_eq!(<f32 as Float>::from_float(0.25_f64), 0.25_f32);
    assert_eq!(<f64 as Float>::from_float(-1.5_f32), -1.5_f64);

    assert_eq!(<f64 as Float>::HALF + <f64 as Float>::HALF, <f64 as Float>::ONE);

    assert!(Float::is_finite(&1.0_f32));
    assert!(!Float::is_finite(&f64::NAN));
    assert!(!Float::is_finite(&f64::INFINITY));
}

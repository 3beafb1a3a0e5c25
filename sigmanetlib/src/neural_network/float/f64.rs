use super::*;

impl Float for f64 {
    const ZERO: Self = 0.0;
    const HALF: Self = 0.5;
    const ONE: Self = 1.0;

    const EPSILON: Self = f64::EPSILON;

    #[inline]
    fn as_f32(&self) -> f32 {
        *self as f32
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn from_float<F: Float>(float: F) -> Self {
        float.as_f64()
    }

    // =================================== Arithmetic functions ===================================

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    #[inline]
    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    #[inline]
    fn powi(&self, n: i32) -> Self {
        f64::powi(*self, n)
    }

    #[inline]
    fn exp(&self) -> Self {
        f64::exp(*self)
    }
}

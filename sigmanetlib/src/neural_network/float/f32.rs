use super::*;

impl Float for f32 {
    const ZERO: Self = 0.0;
    const HALF: Self = 0.5;
    const ONE: Self = 1.0;

    const EPSILON: Self = f32::EPSILON;

    #[inline]
    fn as_f32(&self) -> f32 {
        *self
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        *self as f64
    }

    #[inline]
    fn from_float<F: Float>(float: F) -> Self {
        float.as_f32()
    }

    // =================================== Arithmetic functions ===================================

    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }

    #[inline]
    fn abs(&self) -> Self {
        f32::abs(*self)
    }

    #[inline]
    fn powi(&self, n: i32) -> Self {
        f32::powi(*self, n)
    }

    #[inline]
    fn exp(&self) -> Self {
        f32::exp(*self)
    }
}

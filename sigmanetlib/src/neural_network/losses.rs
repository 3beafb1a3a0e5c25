use super::prelude::*;

#[inline]
/// `(actual - expected)^2`
pub fn squared_error<F: Float>(actual: F, expected: F) -> F {
    (actual - expected).powi(2)
}

#[inline]
/// `actual - expected`
///
/// Derivative of the squared error without its constant factor of 2,
/// which is folded into the learning rate.
pub fn squared_error_derivative<F: Float>(actual: F, expected: F) -> F {
    actual - expected
}

/// `(1 / n) * sum((actual_i - expected_i)^2)`
///
/// Both slices are expected to have the same non-zero length.
pub fn mean_squared_error<F: Float>(actual: &[F], expected: &[F]) -> F {
    let sum = actual.iter()
        .zip(expected.iter())
        .fold(F::ZERO, |sum, (actual, expected)| sum + squared_error(*actual, *expected));

    sum / F::from_float(actual.len() as f64)
}

#[test]
fn test_mean_squared_error() {
    assert_eq!(mean_squared_error(&[1.0_f64, 0.0], &[1.0, 0.0]), 0.0);
    assert_eq!(mean_squared_error(&[1.0_f64, 0.0], &[0.0, 0.0]), 0.5);
    assert_eq!(mean_squared_error(&[3.0_f32], &[1.0]), 4.0);

    assert_eq!(squared_error_derivative(0.75_f64, 0.25), 0.5);
}

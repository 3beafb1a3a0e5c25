use super::prelude::*;

#[inline]
/// `1 / (1 + e^(-x))`
pub fn sigmoid<F: Float>(x: F) -> F {
    F::ONE / (F::ONE + (-x).exp())
}

#[inline]
/// Derivative of the sigmoid function expressed through its
/// already calculated output: `y * (1 - y)` where `y = sigmoid(x)`.
pub fn sigmoid_derivative<F: Float>(y: F) -> F {
    y * (F::ONE - y)
}

#[test]
/// Check known sigmoid values and the output-based derivative.
fn test_sigmoid() {
    assert_eq!(sigmoid(0.0_f64), 0.5);
    assert_eq!(sigmoid_derivative(0.5_f64), 0.25);

    assert!((sigmoid(0.3775_f64) - 0.593_269_992).abs() < 1e-9);
    assert!((sigmoid(2.0_f32) + sigmoid(-2.0_f32) - 1.0).abs() < 1e-6);

    // Compare with numerical derivative.
    let x = 0.7_f64;
    let h = 1e-6;

    let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);

    assert!((sigmoid_derivative(sigmoid(x)) - numeric).abs() < 1e-8);
}

#[test]
/// Large inputs saturate instead of producing NaNs.
fn test_sigmoid_saturation() {
    assert_eq!(sigmoid(1000.0_f64), 1.0);
    assert_eq!(sigmoid(-1000.0_f64), 0.0);

    assert_eq!(sigmoid_derivative(sigmoid(1000.0_f64)), 0.0);
}

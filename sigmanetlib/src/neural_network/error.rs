use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors returned by the network operations.
///
/// Every failing operation leaves the network unmodified.
pub enum NetworkError {
    /// Length of some vector disagrees with the network dimensions,
    /// or gradients of a batch have different shapes.
    #[error("Shape mismatch in {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize
    },

    /// Operation needs at least one gradient or example.
    #[error("Empty batch given")]
    EmptyBatch,

    /// Network must have at least two layers and no empty layers.
    #[error("Invalid network dimensions: {dimensions:?}")]
    InvalidDimensions {
        dimensions: Vec<usize>
    },

    /// Training configuration field has unsupported value.
    #[error("Invalid training config field `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str
    }
}

impl NetworkError {
    #[inline]
    /// Return `ShapeMismatch` error if given lengths are different.
    pub fn check_shape(what: &'static str, expected: usize, got: usize) -> Result<(), Self> {
        if expected == got {
            Ok(())
        } else {
            Err(Self::ShapeMismatch { what, expected, got })
        }
    }
}

#[test]
fn test_check_shape() {
    assert_eq!(NetworkError::check_shape("input", 2, 2), Ok(()));

    let err = NetworkError::check_shape("input", 2, 3).unwrap_err();

    assert_eq!(err.to_string(), "Shape mismatch in input: expected 2, got 3");
}

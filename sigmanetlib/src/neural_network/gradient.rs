use super::prelude::*;

#[derive(Debug, Clone, PartialEq)]
/// Gradient of the network's loss for a single example
/// or a merged batch of examples.
///
/// Deltas are stored per layer, including the input layer (index 0)
/// which is never used to update the network. Delta of a non-input layer
/// is the gradient of that layer's biases. Weight gradients are stored
/// per weight matrix using the same flat layout as the network weights.
pub struct Gradient<F: Float> {
    pub(crate) deltas: Vec<Vec<F>>,
    pub(crate) weights: Vec<Vec<F>>
}

impl<F: Float> Gradient<F> {
    /// Build gradient from raw deltas and weight gradients.
    ///
    /// There must be exactly one weight gradients vector less than
    /// the deltas vectors.
    pub fn from_parts(deltas: Vec<Vec<F>>, weights: Vec<Vec<F>>) -> Result<Self, NetworkError> {
        NetworkError::check_shape("gradient weight matrices", deltas.len().saturating_sub(1), weights.len())?;

        Ok(Self {
            deltas,
            weights
        })
    }

    #[inline]
    /// Per-layer deltas (error signals), index 0 is the input layer.
    pub fn deltas(&self) -> &[Vec<F>] {
        &self.deltas
    }

    #[inline]
    /// Per-connection weight gradients, one vector per weight matrix.
    pub fn weights(&self) -> &[Vec<F>] {
        &self.weights
    }

    #[inline]
    /// Split gradient into deltas and weight gradients.
    pub fn into_parts(self) -> (Vec<Vec<F>>, Vec<Vec<F>>) {
        (self.deltas, self.weights)
    }

    /// Check that given gradient has exactly the same layout as the current one.
    pub fn check_same_shape(&self, other: &Self) -> Result<(), NetworkError> {
        NetworkError::check_shape("gradient layers", self.deltas.len(), other.deltas.len())?;
        NetworkError::check_shape("gradient weight matrices", self.weights.len(), other.weights.len())?;

        for (curr, other) in self.deltas.iter().zip(other.deltas.iter()) {
            NetworkError::check_shape("gradient deltas", curr.len(), other.len())?;
        }

        for (curr, other) in self.weights.iter().zip(other.weights.iter()) {
            NetworkError::check_shape("gradient weights", curr.len(), other.len())?;
        }

        Ok(())
    }

    /// Average given gradients element-wise.
    ///
    /// ```
    /// use sigmanetlib::prelude::*;
    ///
    /// let a = Gradient::from_parts(vec![vec![0.0], vec![1.0]], vec![vec![2.0]]).unwrap();
    /// let b = Gradient::from_parts(vec![vec![0.0], vec![3.0]], vec![vec![4.0]]).unwrap();
    ///
    /// let merged = Gradient::merge(&[a, b]).unwrap();
    ///
    /// assert_eq!(merged.deltas()[1], [2.0]);
    /// assert_eq!(merged.weights()[0], [3.0]);
    /// ```
    pub fn merge(gradients: &[Self]) -> Result<Self, NetworkError> {
        let Some((first, rest)) = gradients.split_first() else {
            return Err(NetworkError::EmptyBatch);
        };

        for gradient in rest {
            first.check_same_shape(gradient)?;
        }

        let mut merged = first.clone();

        for gradient in rest {
            for (sum, deltas) in merged.deltas.iter_mut().zip(gradient.deltas.iter()) {
                for (sum, delta) in sum.iter_mut().zip(deltas.iter()) {
                    *sum += *delta;
                }
            }

            for (sum, weights) in merged.weights.iter_mut().zip(gradient.weights.iter()) {
                for (sum, weight) in sum.iter_mut().zip(weights.iter()) {
                    *sum += *weight;
                }
            }
        }

        let div = F::from_float(gradients.len() as f64);

        merged.deltas.iter_mut()
            .chain(merged.weights.iter_mut())
            .flat_map(|values| values.iter_mut())
            .for_each(|value| *value /= div);

        Ok(merged)
    }
}

#[test]
/// Merging averages every delta and weight gradient.
fn test_merge_gradients() {
    let a = Gradient::from_parts(
        vec![vec![1.0_f64, 2.0], vec![0.5]],
        vec![vec![1.0, -1.0]]
    ).unwrap();

    let b = Gradient::from_parts(
        vec![vec![3.0, 4.0], vec![1.5]],
        vec![vec![-3.0, 5.0]]
    ).unwrap();

    let merged = Gradient::merge(&[a, b]).unwrap();

    assert_eq!(merged.deltas(), &[vec![2.0, 3.0], vec![1.0]]);
    assert_eq!(merged.weights(), &[vec![-1.0, 2.0]]);
}

#[test]
/// Invalid batches are rejected instead of being partially merged.
fn test_merge_invalid_gradients() {
    assert_eq!(Gradient::<f64>::merge(&[]), Err(NetworkError::EmptyBatch));

    let a = Gradient::from_parts(vec![vec![0.0_f32], vec![1.0]], vec![vec![1.0]]).unwrap();
    let b = Gradient::from_parts(vec![vec![0.0_f32], vec![1.0, 2.0]], vec![vec![1.0, 2.0]]).unwrap();

    assert!(matches!(
        Gradient::merge(&[a, b]),
        Err(NetworkError::ShapeMismatch { what: "gradient deltas", expected: 1, got: 2 })
    ));

    assert!(Gradient::<f32>::from_parts(vec![vec![0.0], vec![1.0]], vec![]).is_err());
}

#[cfg(test)]
proptest::proptest! {
    #[test]
    /// Mean of identical gradients is the gradient itself.
    fn test_merge_identical_gradients(
        deltas in proptest::collection::vec(proptest::collection::vec(-10.0_f64..10.0, 1..5), 2..5),
        copies in 1_usize..8
    ) {
        let weights = deltas.windows(2)
            .map(|pair| vec![0.125; pair[0].len() * pair[1].len()])
            .collect::<Vec<_>>();

        let gradient = Gradient::from_parts(deltas, weights).unwrap();
        let merged = Gradient::merge(&vec![gradient.clone(); copies]).unwrap();

        for (merged, original) in merged.deltas().iter().flatten().zip(gradient.deltas().iter().flatten()) {
            proptest::prop_assert!((merged - original).abs() <= 1e-12 * original.abs().max(1.0));
        }

        for (merged, original) in merged.weights().iter().flatten().zip(gradient.weights().iter().flatten()) {
            proptest::prop_assert!((merged - original).abs() <= 1e-12);
        }
    }
}

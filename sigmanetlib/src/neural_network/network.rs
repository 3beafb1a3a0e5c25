use super::prelude::*;

/// Generic `Network` type with f32 float type.
pub type Network32 = Network<f32>;

/// Generic `Network` type with f64 float type.
pub type Network64 = Network<f64>;

/// Activations of every network layer, starting from the input layer.
pub type Activations<F> = Vec<Vec<F>>;

/// Training example in `(input, expected_output)` format.
pub type Example<F> = (Vec<F>, Vec<F>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Order in which weights of a single weight matrix are flattened.
pub enum WeightLayout {
    #[default]
    /// Weight from source node `n` to destination node `m`
    /// is stored at `n * destination_size + m`.
    SourceMajor,

    /// Weight from source node `n` to destination node `m`
    /// is stored at `m * source_size + n`.
    DestinationMajor
}

#[derive(Debug, Clone, PartialEq)]
/// Fully connected feed-forward network with sigmoid activations.
///
/// Network is described by the list of its layer sizes (dimensions).
/// Each pair of neighbour layers is connected by a weight matrix flattened
/// in source-major order, and each non-input layer has its own biases.
///
/// ```
/// use sigmanetlib::prelude::*;
///
/// // XOR training examples.
/// let examples = [
///     (vec![0.0, 0.0], vec![0.0]),
///     (vec![0.0, 1.0], vec![1.0]),
///     (vec![1.0, 0.0], vec![1.0]),
///     (vec![1.0, 1.0], vec![0.0])
/// ];
///
/// // 2 inputs, 1 output, 1 hidden layer with 3 neurons.
/// let mut network = Network64::create_with(2, 1, 3, 1, &mut FastrandSampler::with_seed(7)).unwrap();
///
/// let config = TrainingConfig::default()
///     .with_gamma(0.1)
///     .with_bias_gamma(0.1)
///     .with_momentum(0.8);
///
/// let initial_error = network.error_dataset(&examples).unwrap();
///
/// network.train(&examples, 100, &config).unwrap();
///
/// assert!(network.error_dataset(&examples).unwrap() < initial_error);
/// ```
pub struct Network<F: Float> {
    pub(crate) dimensions: Vec<usize>,
    pub(crate) weights: Vec<Vec<F>>,
    pub(crate) biases: Vec<Vec<F>>
}

impl<F: Float> Network<F> {
    /// Create new network with randomly initialized weights and biases
    /// in `[-1, 1)` range.
    ///
    /// Network will have `hidden_layers` hidden layers with `hidden_size`
    /// neurons each. If `hidden_layers` is 0 then inputs are connected
    /// directly to outputs.
    #[inline]
    pub fn create(
        input_size: usize,
        output_size: usize,
        hidden_size: usize,
        hidden_layers: usize
    ) -> Result<Self, NetworkError> {
        Self::create_with(input_size, output_size, hidden_size, hidden_layers, &mut FastrandSampler::new())
    }

    /// Same as `Network::create` but uses provided sampler
    /// to generate initial weights and biases.
    ///
    /// All the weights are sampled first, matrix by matrix in their
    /// flat order, then all the biases layer by layer.
    pub fn create_with(
        input_size: usize,
        output_size: usize,
        hidden_size: usize,
        hidden_layers: usize,
        sampler: &mut impl Sampler
    ) -> Result<Self, NetworkError> {
        let mut dimensions = Vec::with_capacity(hidden_layers + 2);

        dimensions.push(input_size);
        dimensions.extend(std::iter::repeat(hidden_size).take(hidden_layers));
        dimensions.push(output_size);

        Self::check_dimensions(&dimensions)?;

        let mut sample = || F::from_float(sampler.sample(-1.0, 1.0));

        let weights: Vec<Vec<F>> = dimensions.windows(2)
            .map(|pair| (0..pair[0] * pair[1]).map(|_| sample()).collect())
            .collect();

        let biases: Vec<Vec<F>> = dimensions[1..].iter()
            .map(|size| (0..*size).map(|_| sample()).collect())
            .collect();

        Ok(Self {
            dimensions,
            weights,
            biases
        })
    }

    #[inline]
    /// Build network from existing weights (in source-major layout) and biases.
    pub fn from_parts(
        dimensions: Vec<usize>,
        weights: Vec<Vec<F>>,
        biases: Vec<Vec<F>>
    ) -> Result<Self, NetworkError> {
        Self::from_parts_with_layout(dimensions, weights, biases, WeightLayout::SourceMajor)
    }

    /// Build network from existing weights and biases, where weights
    /// are flattened using given layout.
    ///
    /// Weights are always stored in source-major layout, so destination-major
    /// matrices are transposed during construction.
    pub fn from_parts_with_layout(
        dimensions: Vec<usize>,
        weights: Vec<Vec<F>>,
        biases: Vec<Vec<F>>,
        layout: WeightLayout
    ) -> Result<Self, NetworkError> {
        Self::check_dimensions(&dimensions)?;

        NetworkError::check_shape("weight matrices", dimensions.len() - 1, weights.len())?;
        NetworkError::check_shape("bias vectors", dimensions.len() - 1, biases.len())?;

        for (i, pair) in dimensions.windows(2).enumerate() {
            NetworkError::check_shape("weights", pair[0] * pair[1], weights[i].len())?;
            NetworkError::check_shape("biases", pair[1], biases[i].len())?;
        }

        let weights = match layout {
            WeightLayout::SourceMajor => weights,

            WeightLayout::DestinationMajor => dimensions.windows(2)
                .zip(weights)
                .map(|(pair, matrix)| transpose(&matrix, pair[1], pair[0]))
                .collect()
        };

        Ok(Self {
            dimensions,
            weights,
            biases
        })
    }

    fn check_dimensions(dimensions: &[usize]) -> Result<(), NetworkError> {
        if dimensions.len() < 2 || dimensions.contains(&0) {
            return Err(NetworkError::InvalidDimensions {
                dimensions: dimensions.to_vec()
            });
        }

        Ok(())
    }

    #[inline]
    /// Sizes of all the network layers, starting from the input one.
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    #[inline]
    /// Flattened weight matrices, one per pair of neighbour layers.
    pub fn weights(&self) -> &[Vec<F>] {
        &self.weights
    }

    #[inline]
    /// Bias vectors, one per non-input layer.
    pub fn biases(&self) -> &[Vec<F>] {
        &self.biases
    }

    #[inline]
    /// Size of the input layer.
    pub fn input_size(&self) -> usize {
        self.dimensions[0]
    }

    #[inline]
    /// Size of the output layer.
    pub fn output_size(&self) -> usize {
        self.dimensions[self.dimensions.len() - 1]
    }

    #[inline]
    /// Amount of weights and biases of the network.
    pub fn params(&self) -> usize {
        self.weights.iter().map(Vec::len).sum::<usize>() +
            self.biases.iter().map(Vec::len).sum::<usize>()
    }

    /// Weights of the given matrix flattened using provided layout.
    pub fn weights_with_layout(&self, matrix: usize, layout: WeightLayout) -> Option<Vec<F>> {
        let weights = self.weights.get(matrix)?;

        match layout {
            WeightLayout::SourceMajor => Some(weights.clone()),
            WeightLayout::DestinationMajor => Some(transpose(weights, self.dimensions[matrix], self.dimensions[matrix + 1]))
        }
    }

    /// Check that given example has the same sizes as the network's
    /// input and output layers.
    pub fn check_example(&self, input: &[F], expected: &[F]) -> Result<(), NetworkError> {
        NetworkError::check_shape("input", self.input_size(), input.len())?;
        NetworkError::check_shape("expected output", self.output_size(), expected.len())
    }

    /// Calculate activations of all the network layers
    /// (perform forward propagation).
    ///
    /// First returned vector is the input itself, the last one
    /// is the network's output.
    pub fn eval(&self, input: &[F]) -> Result<Activations<F>, NetworkError> {
        NetworkError::check_shape("input", self.input_size(), input.len())?;

        let mut activations = Vec::with_capacity(self.dimensions.len());

        activations.push(input.to_vec());

        for (layer, pair) in self.dimensions.windows(2).enumerate() {
            let (curr_size, next_size) = (pair[0], pair[1]);

            let weights = &self.weights[layer];
            let mut next = self.biases[layer].clone();

            for (n, value) in activations[layer].iter().enumerate() {
                let row = &weights[n * next_size..(n + 1) * next_size];

                for (sum, weight) in next.iter_mut().zip(row) {
                    *sum += *value * *weight;
                }
            }

            debug_assert_eq!(activations[layer].len(), curr_size);

            next.iter_mut().for_each(|value| *value = sigmoid(*value));

            activations.push(next);
        }

        Ok(activations)
    }

    #[inline]
    /// Calculate activations of the network's output layer.
    pub fn output(&self, input: &[F]) -> Result<Vec<F>, NetworkError> {
        Ok(self.eval(input)?.pop().unwrap_or_default())
    }

    /// Calculate gradient of the network's loss for given example
    /// (perform backward propagation).
    ///
    /// Loss is the squared error of the output layer.
    pub fn gradient(&self, input: &[F], expected: &[F]) -> Result<Gradient<F>, NetworkError> {
        NetworkError::check_shape("expected output", self.output_size(), expected.len())?;

        let activations = self.eval(input)?;
        let layers = self.dimensions.len();

        let mut deltas = vec![Vec::new(); layers];
        let mut weights = vec![Vec::new(); layers - 1];

        deltas[layers - 1] = activations[layers - 1].iter()
            .zip(expected.iter())
            .map(|(actual, expected)| sigmoid_derivative(*actual) * squared_error_derivative(*actual, *expected))
            .collect();

        for layer in (0..layers - 1).rev() {
            let next_size = self.dimensions[layer + 1];
            let layer_weights = &self.weights[layer];

            let mut curr_deltas = Vec::with_capacity(self.dimensions[layer]);
            let mut weight_gradients = Vec::with_capacity(layer_weights.len());

            for (n, activation) in activations[layer].iter().enumerate() {
                let row = &layer_weights[n * next_size..(n + 1) * next_size];
                let mut sum = F::ZERO;

                for (weight, next_delta) in row.iter().zip(deltas[layer + 1].iter()) {
                    sum += *weight * *next_delta;

                    weight_gradients.push(*next_delta * *activation);
                }

                curr_deltas.push(sum * sigmoid_derivative(*activation));
            }

            deltas[layer] = curr_deltas;
            weights[layer] = weight_gradients;
        }

        Ok(Gradient {
            deltas,
            weights
        })
    }

    /// Update weights and biases of the network by subtracting
    /// given gradient scaled by learning rates.
    ///
    /// `gamma` scales weight gradients, `gamma_b` scales deltas
    /// used to update biases.
    pub fn apply(&mut self, gradient: &Gradient<F>, gamma: F, gamma_b: F) -> Result<(), NetworkError> {
        self.check_gradient(gradient)?;

        for (biases, deltas) in self.biases.iter_mut().zip(gradient.deltas.iter().skip(1)) {
            for (bias, delta) in biases.iter_mut().zip(deltas.iter()) {
                *bias -= *delta * gamma_b;
            }
        }

        for (weights, gradients) in self.weights.iter_mut().zip(gradient.weights.iter()) {
            for (weight, gradient) in weights.iter_mut().zip(gradients.iter()) {
                *weight -= *gradient * gamma;
            }
        }

        Ok(())
    }

    #[inline]
    /// Call `Network::apply` with `0.01` learning rates.
    pub fn apply_default(&mut self, gradient: &Gradient<F>) -> Result<(), NetworkError> {
        let rate = F::from_float(0.01);

        self.apply(gradient, rate, rate)
    }

    /// Check that given gradient was calculated for a network
    /// of the same shape.
    pub fn check_gradient(&self, gradient: &Gradient<F>) -> Result<(), NetworkError> {
        NetworkError::check_shape("gradient layers", self.dimensions.len(), gradient.deltas.len())?;
        NetworkError::check_shape("gradient weight matrices", self.weights.len(), gradient.weights.len())?;

        for (biases, deltas) in self.biases.iter().zip(gradient.deltas.iter().skip(1)) {
            NetworkError::check_shape("gradient deltas", biases.len(), deltas.len())?;
        }

        for (weights, gradients) in self.weights.iter().zip(gradient.weights.iter()) {
            NetworkError::check_shape("gradient weights", weights.len(), gradients.len())?;
        }

        Ok(())
    }

    /// Mean squared error of the network's output for given example.
    pub fn error(&self, input: &[F], expected: &[F]) -> Result<F, NetworkError> {
        NetworkError::check_shape("expected output", self.output_size(), expected.len())?;

        let output = self.output(input)?;

        Ok(mean_squared_error(&output, expected))
    }

    /// Mean of `Network::error` values over all the given examples.
    pub fn error_dataset(&self, examples: &[Example<F>]) -> Result<F, NetworkError> {
        if examples.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }

        let mut error = F::ZERO;

        for (input, expected) in examples {
            error += self.error(input, expected)?;
        }

        Ok(error / F::from_float(examples.len() as f64))
    }

    /// Train the network on given examples for `epochs` epochs.
    ///
    /// Creates new single-threaded `Trainer` with provided config.
    /// Use `Trainer` directly to keep momentum state between calls
    /// or to calculate gradients on multiple threads.
    pub fn train(&mut self, examples: &[Example<F>], epochs: usize, config: &TrainingConfig<F>) -> Result<(), NetworkError> {
        Trainer::new(*config).train(self, examples, epochs)
    }
}

impl<F: Float> std::fmt::Display for Network<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_rows<F: Float>(f: &mut std::fmt::Formatter<'_>, rows: &[Vec<F>]) -> std::fmt::Result {
            for row in rows {
                let row = row.iter()
                    .map(F::to_string)
                    .collect::<Vec<_>>()
                    .join(",");

                writeln!(f, "{row}")?;
            }

            Ok(())
        }

        writeln!(f, "Weights: ")?;
        write_rows(f, &self.weights)?;

        writeln!(f, "Biases: ")?;
        write_rows(f, &self.biases)
    }
}

/// Transpose `rows x columns` matrix stored in a flat row-major slice.
fn transpose<F: Float>(matrix: &[F], rows: usize, columns: usize) -> Vec<F> {
    let mut transposed = Vec::with_capacity(matrix.len());

    for column in 0..columns {
        for row in 0..rows {
            transposed.push(matrix[row * columns + column]);
        }
    }

    transposed
}

#[cfg(test)]
/// 2-2-2 network from the well known step-by-step backpropagation example.
fn classic_network(layout: WeightLayout) -> Network64 {
    Network::from_parts_with_layout(
        vec![2, 2, 2],
        vec![
            vec![0.15, 0.20, 0.25, 0.30],
            vec![0.40, 0.45, 0.50, 0.55]
        ],
        vec![
            vec![0.35, 0.35],
            vec![0.60, 0.60]
        ],
        layout
    ).unwrap()
}

#[cfg(test)]
fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len());

    for (actual, expected) in actual.iter().zip(expected) {
        assert!((actual - expected).abs() < tolerance, "{actual} != {expected}");
    }
}

#[test]
/// Random networks have correctly sized weights and biases.
fn test_network_create() {
    let network = Network64::create(3, 2, 4, 2).unwrap();

    assert_eq!(network.dimensions(), &[3, 4, 4, 2]);
    assert_eq!(network.weights().iter().map(Vec::len).collect::<Vec<_>>(), [12, 16, 8]);
    assert_eq!(network.biases().iter().map(Vec::len).collect::<Vec<_>>(), [4, 4, 2]);
    assert_eq!(network.params(), 36 + 10);

    assert!(network.weights().iter().chain(network.biases()).flatten().all(|value| (-1.0..1.0).contains(value)));

    // No hidden layers - inputs are connected to outputs directly.
    let network = Network32::create(3, 2, 4, 0).unwrap();

    assert_eq!(network.dimensions(), &[3, 2]);
    assert_eq!(network.weights().len(), 1);
    assert_eq!(network.weights()[0].len(), 6);
    assert_eq!(network.biases().len(), 1);
    assert_eq!(network.biases()[0].len(), 2);

    assert!(matches!(Network64::create(0, 2, 4, 1), Err(NetworkError::InvalidDimensions { .. })));
    assert!(matches!(Network64::create(2, 2, 0, 1), Err(NetworkError::InvalidDimensions { .. })));
}

#[test]
/// Weights are sampled before biases, each in flat order.
fn test_network_create_sampling_order() {
    let mut counter = 0.0;

    let network = Network64::create_with(2, 1, 2, 1, &mut |_min: f64, _max: f64| {
        counter += 1.0;

        counter
    }).unwrap();

    assert_eq!(network.weights(), &[vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0]]);
    assert_eq!(network.biases(), &[vec![7.0, 8.0], vec![9.0]]);
}

#[test]
/// Networks built from inconsistent parts are rejected.
fn test_network_from_invalid_parts() {
    assert!(matches!(
        Network64::from_parts(vec![2, 1], vec![vec![0.0; 3]], vec![vec![0.0]]),
        Err(NetworkError::ShapeMismatch { what: "weights", expected: 2, got: 3 })
    ));

    assert!(matches!(
        Network64::from_parts(vec![2, 1], vec![vec![0.0; 2]], vec![]),
        Err(NetworkError::ShapeMismatch { what: "bias vectors", .. })
    ));

    assert!(matches!(
        Network64::from_parts(vec![2], vec![], vec![]),
        Err(NetworkError::InvalidDimensions { .. })
    ));
}

#[test]
/// Forward propagation of the classic 2-2-2 network in both weight layouts.
fn test_network_eval() {
    let network = classic_network(WeightLayout::DestinationMajor);
    let activations = network.eval(&[0.05, 0.10]).unwrap();

    assert_eq!(activations.len(), 3);
    assert_eq!(activations[0], [0.05, 0.10]);

    assert_close(&activations[1], &[0.593_269_992, 0.596_884_378], 1e-8);
    assert_close(&activations[2], &[0.751_365_070, 0.772_928_465], 1e-8);

    let network = classic_network(WeightLayout::SourceMajor);
    let activations = network.eval(&[0.05, 0.10]).unwrap();

    assert_close(&activations[1], &[0.594_475_931, 0.596_282_699], 1e-8);
    assert_close(&activations[2], &[0.756_931_915, 0.767_717_880], 1e-8);

    assert_eq!(network.output(&[0.05, 0.10]).unwrap(), activations[2]);

    // Evaluation is deterministic.
    assert_eq!(network.eval(&[0.05, 0.10]).unwrap(), activations);
}

#[test]
/// Wrong input size is reported before any computation.
fn test_network_eval_shape_mismatch() {
    let network = classic_network(WeightLayout::SourceMajor);

    assert_eq!(
        network.eval(&[0.05]),
        Err(NetworkError::ShapeMismatch { what: "input", expected: 2, got: 1 })
    );

    assert!(network.gradient(&[0.05, 0.10], &[0.01]).is_err());
    assert!(network.gradient(&[0.05, 0.10, 0.15], &[0.01, 0.99]).is_err());
    assert!(network.error(&[0.05, 0.10], &[0.01, 0.99, 0.5]).is_err());
}

#[test]
/// Weight layout conversion round-trips through the network.
fn test_network_weight_layouts() {
    let network = classic_network(WeightLayout::DestinationMajor);

    assert_eq!(network.weights()[0], [0.15, 0.25, 0.20, 0.30]);
    assert_eq!(network.weights_with_layout(0, WeightLayout::DestinationMajor).unwrap(), [0.15, 0.20, 0.25, 0.30]);
    assert_eq!(network.weights_with_layout(2, WeightLayout::SourceMajor), None);

    // Non-square matrix: 3 sources, 2 destinations.
    let network = Network64::from_parts_with_layout(
        vec![3, 2],
        vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]],
        vec![vec![0.0, 0.0]],
        WeightLayout::DestinationMajor
    ).unwrap();

    assert_eq!(network.weights()[0], [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
/// Mean squared error of the classic network.
fn test_network_error() {
    let network = classic_network(WeightLayout::DestinationMajor);

    assert!((network.error(&[0.05, 0.10], &[0.01, 0.99]).unwrap() - 0.298_371_109).abs() < 1e-8);

    let network = classic_network(WeightLayout::SourceMajor);

    assert!((network.error(&[0.05, 0.10], &[0.01, 0.99]).unwrap() - 0.303_658_314).abs() < 1e-8);

    let examples = [
        (vec![0.05, 0.10], vec![0.01, 0.99]),
        (vec![0.05, 0.10], vec![0.01, 0.99])
    ];

    assert!((network.error_dataset(&examples).unwrap() - 0.303_658_314).abs() < 1e-8);
    assert_eq!(network.error_dataset(&[]), Err(NetworkError::EmptyBatch));
}

#[test]
/// Backpropagated deltas and weight gradients of the classic network.
fn test_network_gradient() {
    let network = classic_network(WeightLayout::SourceMajor);
    let gradient = network.gradient(&[0.05, 0.10], &[0.01, 0.99]).unwrap();

    assert_eq!(gradient.deltas().len(), 3);
    assert_eq!(gradient.weights().len(), 2);

    assert_close(&gradient.deltas()[2], &[0.137_425_009, -0.039_638_934], 1e-8);
    assert_close(&gradient.deltas()[1], &[0.008_951_687, 0.011_292_890], 1e-8);
    assert_close(&gradient.deltas()[0], &[0.000_171_063, 0.000_506_321], 1e-8);

    assert_close(&gradient.weights()[1], &[0.081_695_860, -0.023_564_392, 0.081_944_155, -0.023_636_011], 1e-8);
    assert_close(&gradient.weights()[0], &[0.000_447_584, 0.000_564_645, 0.000_895_169, 0.001_129_289], 1e-8);
}

#[test]
/// Analytic weight gradients match finite differences of the loss.
fn test_network_gradient_finite_differences() {
    let network = Network64::create_with(3, 2, 4, 2, &mut FastrandSampler::with_seed(123)).unwrap();

    let input = [0.3, -0.7, 0.9];
    let expected = [0.2, 0.8];

    let gradient = network.gradient(&input, &expected).unwrap();

    // Error is the mean over outputs and the gradient omits the
    // factor of 2 of the squared error derivative.
    let scale = network.output_size() as f64 / 2.0;
    let eps = 1e-6;

    for matrix in 0..network.weights().len() {
        for k in 0..network.weights()[matrix].len() {
            let mut plus = network.clone();
            let mut minus = network.clone();

            plus.weights[matrix][k] += eps;
            minus.weights[matrix][k] -= eps;

            let numeric = (plus.error(&input, &expected).unwrap() - minus.error(&input, &expected).unwrap()) / (2.0 * eps);

            assert!((numeric * scale - gradient.weights()[matrix][k]).abs() < 1e-7);
        }
    }

    for layer in 0..network.biases().len() {
        for k in 0..network.biases()[layer].len() {
            let mut plus = network.clone();
            let mut minus = network.clone();

            plus.biases[layer][k] += eps;
            minus.biases[layer][k] -= eps;

            let numeric = (plus.error(&input, &expected).unwrap() - minus.error(&input, &expected).unwrap()) / (2.0 * eps);

            assert!((numeric * scale - gradient.deltas()[layer + 1][k]).abs() < 1e-7);
        }
    }
}

#[test]
/// Single gradient descent step reduces the error.
fn test_network_apply() {
    for layout in [WeightLayout::SourceMajor, WeightLayout::DestinationMajor] {
        let mut network = classic_network(layout);

        let before = network.error(&[0.05, 0.10], &[0.01, 0.99]).unwrap();
        let gradient = network.gradient(&[0.05, 0.10], &[0.01, 0.99]).unwrap();

        network.apply(&gradient, 0.5, 0.5).unwrap();

        let after = network.error(&[0.05, 0.10], &[0.01, 0.99]).unwrap();

        assert!(after < before);
        assert_eq!(network.dimensions(), &[2, 2, 2]);
    }

    let mut network = classic_network(WeightLayout::SourceMajor);
    let gradient = network.gradient(&[0.05, 0.10], &[0.01, 0.99]).unwrap();

    network.apply(&gradient, 0.5, 0.5).unwrap();

    assert!((network.error(&[0.05, 0.10], &[0.01, 0.99]).unwrap() - 0.285_877_390).abs() < 1e-8);

    assert!((network.biases()[1][0] - (0.60 - 0.5 * 0.137_425_009)).abs() < 1e-8);
    assert!((network.weights()[1][0] - (0.40 - 0.5 * 0.081_695_860)).abs() < 1e-8);
}

#[test]
/// Gradients of differently shaped networks are rejected without changes.
fn test_network_apply_shape_mismatch() {
    let mut network = classic_network(WeightLayout::SourceMajor);
    let other = Network64::create(2, 2, 3, 1).unwrap();

    let gradient = other.gradient(&[0.05, 0.10], &[0.01, 0.99]).unwrap();
    let original = network.clone();

    assert!(network.apply(&gradient, 0.5, 0.5).is_err());
    assert!(network.apply_default(&gradient).is_err());
    assert_eq!(network, original);
}

#[test]
/// Debug dump lists weights and biases row by row.
fn test_network_display() {
    let network = classic_network(WeightLayout::SourceMajor);

    assert_eq!(
        network.to_string(),
        "Weights: \n0.15,0.2,0.25,0.3\n0.4,0.45,0.5,0.55\nBiases: \n0.35,0.35\n0.6,0.6\n"
    );
}

#[cfg(test)]
proptest::proptest! {
    #[test]
    /// Weight and bias shapes always follow the network dimensions.
    fn test_network_shape_invariants(
        input_size in 1_usize..5,
        output_size in 1_usize..5,
        hidden_size in 1_usize..5,
        hidden_layers in 0_usize..4,
        seed in proptest::prelude::any::<u64>(),
        steps in 0_usize..4
    ) {
        let mut sampler = FastrandSampler::with_seed(seed);
        let mut network = Network64::create_with(input_size, output_size, hidden_size, hidden_layers, &mut sampler).unwrap();

        for _ in 0..steps {
            let input = (0..input_size).map(|_| sampler.sample(0.0, 1.0)).collect::<Vec<_>>();
            let expected = (0..output_size).map(|_| sampler.sample(0.0, 1.0)).collect::<Vec<_>>();

            let gradient = network.gradient(&input, &expected).unwrap();

            network.apply(&gradient, 0.2, 0.2).unwrap();
        }

        let dimensions = network.dimensions();

        proptest::prop_assert_eq!(dimensions.len(), hidden_layers + 2);
        proptest::prop_assert_eq!(network.weights().len(), dimensions.len() - 1);
        proptest::prop_assert_eq!(network.biases().len(), dimensions.len() - 1);

        for i in 0..dimensions.len() - 1 {
            proptest::prop_assert_eq!(network.weights()[i].len(), dimensions[i] * dimensions[i + 1]);
            proptest::prop_assert_eq!(network.biases()[i].len(), dimensions[i + 1]);
        }
    }
}

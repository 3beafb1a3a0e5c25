use serde::{Serialize, Deserialize};

use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Parameters of the mini-batch gradient descent.
///
/// Every field is optional when deserialized and falls back
/// to its default value.
///
/// ```
/// use sigmanetlib::prelude::*;
///
/// let config = TrainingConfig::<f64>::default()
///     .with_gamma(0.1)
///     .with_batch_size(4);
///
/// assert_eq!(config.gamma, 0.1);
/// assert_eq!(config.gamma_b, 0.2);
/// assert_eq!(config.momentum, 0.5);
/// assert_eq!(config.batch_size, 4);
/// ```
pub struct TrainingConfig<F: Float> {
    /// Learning rate of the weights.
    pub gamma: F,

    /// Learning rate of the biases.
    pub gamma_b: F,

    /// Scale of the learning rates used to apply
    /// previous batch's gradient once again.
    ///
    /// Set to 0 to disable momentum.
    pub momentum: F,

    /// Amount of examples merged into a single gradient.
    #[serde(rename = "batchSize")]
    pub batch_size: usize
}

impl<F: Float> Default for TrainingConfig<F> {
    #[inline]
    fn default() -> Self {
        Self {
            gamma: F::from_float(0.2),
            gamma_b: F::from_float(0.2),
            momentum: F::HALF,
            batch_size: 1
        }
    }
}

impl<F: Float> TrainingConfig<F> {
    #[inline]
    /// Change learning rate of the weights.
    pub fn with_gamma(mut self, gamma: F) -> Self {
        self.gamma = gamma;

        self
    }

    #[inline]
    /// Change learning rate of the biases.
    pub fn with_bias_gamma(mut self, gamma_b: F) -> Self {
        self.gamma_b = gamma_b;

        self
    }

    #[inline]
    /// Change momentum learning rates scale.
    pub fn with_momentum(mut self, momentum: F) -> Self {
        self.momentum = momentum;

        self
    }

    #[inline]
    /// Change amount of examples per batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;

        self
    }

    /// Check that all the config values can be used for training.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !self.gamma.is_finite() {
            return Err(NetworkError::InvalidConfig { field: "gamma", reason: "must be a finite number" });
        }

        if !self.gamma_b.is_finite() {
            return Err(NetworkError::InvalidConfig { field: "gamma_b", reason: "must be a finite number" });
        }

        if !self.momentum.is_finite() {
            return Err(NetworkError::InvalidConfig { field: "momentum", reason: "must be a finite number" });
        }

        if self.batch_size == 0 {
            return Err(NetworkError::InvalidConfig { field: "batchSize", reason: "must be at least 1" });
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Mini-batch gradient descent driver.
///
/// Each batch is processed in two phases: merged gradient of the batch
/// is applied with configured learning rates, then the merged gradient
/// of the previous batch (if any) is applied once again with learning
/// rates scaled by the momentum. Previous batch is remembered across
/// epochs and `Trainer::train` calls until `Trainer::reset` is called.
pub struct Trainer<F: Float, D: Device = CPUDevice> {
    config: TrainingConfig<F>,
    device: D,
    previous_gradient: Option<Gradient<F>>,
    batches: usize
}

impl<F: Float> Trainer<F, CPUDevice> {
    #[inline]
    /// Create new single-threaded trainer.
    pub fn new(config: TrainingConfig<F>) -> Self {
        Self::with_device(config, CPUDevice::default())
    }
}

impl<F: Float, D: Device> Trainer<F, D> {
    #[inline]
    /// Create new trainer which will use given device
    /// to calculate gradients of the batches.
    pub fn with_device(config: TrainingConfig<F>, device: D) -> Self {
        Self {
            config,
            device,
            previous_gradient: None,
            batches: 0
        }
    }

    #[inline]
    pub fn config(&self) -> &TrainingConfig<F> {
        &self.config
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    /// Amount of batches applied by this trainer.
    pub fn batches(&self) -> usize {
        self.batches
    }

    #[inline]
    /// Merged gradient of the last applied batch.
    pub fn previous_gradient(&self) -> Option<&Gradient<F>> {
        self.previous_gradient.as_ref()
    }

    #[inline]
    /// Forget previous batch's gradient and applied batches counter.
    pub fn reset(&mut self) {
        self.previous_gradient = None;
        self.batches = 0;
    }

    /// Calculate merged gradient of the given batch and apply it to the network,
    /// then apply previous batch's gradient with momentum-scaled learning rates.
    ///
    /// Network is not modified if this method fails.
    pub fn step(&mut self, network: &mut Network<F>, batch: &[Example<F>]) -> Result<(), NetworkError> {
        let gradients = self.device.gradients(network, batch)?;
        let gradient = Gradient::merge(&gradients)?;

        network.check_gradient(&gradient)?;

        if let Some(previous) = &self.previous_gradient {
            network.check_gradient(previous)?;
        }

        network.apply(&gradient, self.config.gamma, self.config.gamma_b)?;

        if let Some(previous) = &self.previous_gradient {
            network.apply(
                previous,
                self.config.gamma * self.config.momentum,
                self.config.gamma_b * self.config.momentum
            )?;
        }

        self.previous_gradient = Some(gradient);
        self.batches += 1;

        tracing::trace!(batch = self.batches, size = batch.len(), "batch applied");

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(examples = examples.len(), epochs = epochs))]
    /// Train the network on given examples for `epochs` epochs.
    ///
    /// Examples are processed in the given order in batches of `batch_size`
    /// examples. Last batch of the epoch can be smaller if examples amount
    /// is not divisible by the batch size.
    ///
    /// Config and all the examples are validated before the first update,
    /// so network is not modified if this method fails.
    pub fn train(&mut self, network: &mut Network<F>, examples: &[Example<F>], epochs: usize) -> Result<(), NetworkError> {
        self.config.validate()?;

        for (input, expected) in examples {
            network.check_example(input, expected)?;
        }

        if let Some(previous) = &self.previous_gradient {
            network.check_gradient(previous)?;
        }

        for epoch in 0..epochs {
            for batch in examples.chunks(self.config.batch_size) {
                self.step(network, batch)?;
            }

            tracing::debug!(epoch, batches = self.batches, "epoch finished");
        }

        Ok(())
    }
}

#[cfg(test)]
fn xor_examples() -> Vec<Example<f64>> {
    vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0])
    ]
}

#[test]
/// Partial JSON configs fall back to defaults and use `batchSize` key.
fn test_training_config_serde() {
    let config: TrainingConfig<f64> = serde_json::from_str("{}").unwrap();

    assert_eq!(config, TrainingConfig::default());

    let config: TrainingConfig<f64> = serde_json::from_str(r#"{ "gamma": 0.1, "momentum": 0.8, "batchSize": 2 }"#).unwrap();

    assert_eq!(config.gamma, 0.1);
    assert_eq!(config.gamma_b, 0.2);
    assert_eq!(config.momentum, 0.8);
    assert_eq!(config.batch_size, 2);

    let json = serde_json::to_value(TrainingConfig::<f64>::default()).unwrap();

    assert_eq!(json["batchSize"], 1);
}

#[test]
/// Invalid configs are rejected before training.
fn test_training_config_validate() {
    let mut network = Network64::create(2, 1, 3, 1).unwrap();
    let original = network.clone();

    for config in [
        TrainingConfig::default().with_batch_size(0),
        TrainingConfig::default().with_gamma(f64::NAN),
        TrainingConfig::default().with_bias_gamma(f64::INFINITY),
        TrainingConfig::default().with_momentum(f64::NEG_INFINITY)
    ] {
        assert!(matches!(
            network.train(&xor_examples(), 1, &config),
            Err(NetworkError::InvalidConfig { .. })
        ));
    }

    assert_eq!(network, original);
}

#[test]
/// Wrongly shaped example fails training without changing the network.
fn test_trainer_invalid_examples() {
    let mut network = Network64::create(2, 1, 3, 1).unwrap();
    let original = network.clone();

    let mut examples = xor_examples();

    examples.push((vec![1.0, 1.0], vec![0.0, 1.0]));

    let mut trainer = Trainer::new(TrainingConfig::default());

    assert!(matches!(
        trainer.train(&mut network, &examples, 10),
        Err(NetworkError::ShapeMismatch { what: "expected output", expected: 1, got: 2 })
    ));

    assert_eq!(network, original);
    assert_eq!(trainer.batches(), 0);
}

#[test]
/// Amount of applied batches is `epochs * ceil(examples / batch_size)`.
fn test_trainer_batches_count() {
    let examples = xor_examples().into_iter().chain(xor_examples()).take(7).collect::<Vec<_>>();

    for (batch_size, expected) in [(1, 21), (2, 12), (3, 9), (7, 3), (10, 3)] {
        let mut network = Network64::create(2, 1, 3, 1).unwrap();
        let mut trainer = Trainer::new(TrainingConfig::default().with_batch_size(batch_size));

        trainer.train(&mut network, &examples, 3).unwrap();

        assert_eq!(trainer.batches(), expected);
    }
}

#[test]
/// Without momentum training is plain mini-batch gradient descent.
fn test_trainer_without_momentum() {
    let examples = xor_examples();
    let config = TrainingConfig::default()
        .with_momentum(0.0)
        .with_batch_size(3);

    let mut network = Network64::create_with(2, 1, 3, 1, &mut FastrandSampler::with_seed(1)).unwrap();
    let mut expected = network.clone();

    network.train(&examples, 5, &config).unwrap();

    for _ in 0..5 {
        for batch in examples.chunks(3) {
            let gradients = batch.iter()
                .map(|(input, output)| expected.gradient(input, output).unwrap())
                .collect::<Vec<_>>();

            let gradient = Gradient::merge(&gradients).unwrap();

            expected.apply(&gradient, 0.2, 0.2).unwrap();
        }
    }

    assert_eq!(network, expected);
}

#[test]
/// Each batch after the first one re-applies the previous batch's gradient.
fn test_trainer_momentum() {
    let examples = xor_examples();
    let config = TrainingConfig::default()
        .with_gamma(0.3)
        .with_bias_gamma(0.1)
        .with_momentum(0.5)
        .with_batch_size(2);

    let mut network = Network64::create_with(2, 1, 3, 1, &mut FastrandSampler::with_seed(2)).unwrap();
    let mut expected = network.clone();

    let mut trainer = Trainer::new(config);

    trainer.train(&mut network, &examples, 2).unwrap();

    let mut previous: Option<Gradient<f64>> = None;

    for _ in 0..2 {
        for batch in examples.chunks(2) {
            let gradients = batch.iter()
                .map(|(input, output)| expected.gradient(input, output).unwrap())
                .collect::<Vec<_>>();

            let gradient = Gradient::merge(&gradients).unwrap();

            expected.apply(&gradient, 0.3, 0.1).unwrap();

            if let Some(previous) = &previous {
                expected.apply(previous, 0.3 * 0.5, 0.1 * 0.5).unwrap();
            }

            previous = Some(gradient);
        }
    }

    assert_eq!(network, expected);
    assert_eq!(trainer.batches(), 4);
    assert_eq!(trainer.previous_gradient(), previous.as_ref());

    // Reset clears momentum state.
    trainer.reset();

    assert_eq!(trainer.batches(), 0);
    assert!(trainer.previous_gradient().is_none());
}

#[test]
/// Multithreaded gradients device gives the same training results.
fn test_trainer_multithreaded() {
    let examples = xor_examples();
    let config = TrainingConfig::default().with_batch_size(4);

    let mut single = Network64::create_with(2, 1, 4, 2, &mut FastrandSampler::with_seed(3)).unwrap();
    let mut multi = single.clone();

    Trainer::new(config).train(&mut single, &examples, 50).unwrap();
    Trainer::with_device(config, CPUDevice::multithreaded(3)).train(&mut multi, &examples, 50).unwrap();

    assert_eq!(single, multi);
}

#[test]
/// XOR training reduces the dataset error by at least an order of magnitude.
fn test_trainer_xor_convergence() {
    let examples = xor_examples();

    let config = TrainingConfig::default()
        .with_gamma(0.1)
        .with_bias_gamma(0.1)
        .with_momentum(0.8)
        .with_batch_size(1);

    let mut network = Network64::create_with(2, 1, 3, 1, &mut FastrandSampler::with_seed(42)).unwrap();

    let initial_error = network.error_dataset(&examples).unwrap();

    network.train(&examples, 30000, &config).unwrap();

    let error = network.error_dataset(&examples).unwrap();

    assert!(error * 10.0 < initial_error, "{error} >= {initial_error} / 10");

    for (input, expected) in &examples {
        let output = network.output(input).unwrap();

        assert!((output[0] - expected[0]).abs() < 0.5);
    }
}

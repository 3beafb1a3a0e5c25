use std::path::PathBuf;

use clap::{Parser, Args};

use sigmanetlib::prelude::*;

pub mod train;
pub mod classic;

#[derive(Parser)]
#[command(version, about)]
pub enum CLI {
    /// Train a network on the XOR truth table.
    Xor {
        #[command(flatten)]
        network: NetworkArgs,

        #[command(flatten)]
        training: TrainingArgs
    },

    /// Train a network on examples from a JSON file.
    Train {
        #[arg(long, short)]
        /// Path to the JSON file with `[[input, expected_output], ...]` examples.
        dataset: PathBuf,

        #[arg(long, short)]
        /// Path to the JSON training config.
        ///
        /// Recognized keys are `gamma`, `gamma_b`, `momentum` and `batchSize`.
        /// Command line options override values from this file.
        config: Option<PathBuf>,

        #[arg(long)]
        /// Print weights and biases of the trained network.
        dump: bool,

        #[command(flatten)]
        network: NetworkArgs,

        #[command(flatten)]
        training: TrainingArgs
    },

    /// Show forward and backward propagation of the 2-2-2 reference network.
    Classic {
        #[arg(long, default_value_t = 0.5)]
        /// Learning rate of the single gradient descent step.
        learn_rate: f64,

        #[arg(long)]
        /// Read reference weights in destination-major order.
        destination_major: bool
    }
}

impl CLI {
    #[inline]
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Xor { network, training } => {
                init_logging(training.verbose);

                train::xor(network, training)
            }

            Self::Train { dataset, config, dump, network, training } => {
                init_logging(training.verbose);

                train::dataset(dataset, config, dump, network, training)
            }

            Self::Classic { learn_rate, destination_major } => {
                init_logging(0);

                let layout = if destination_major {
                    WeightLayout::DestinationMajor
                } else {
                    WeightLayout::SourceMajor
                };

                classic::execute(learn_rate, layout)
            }
        }
    }
}

#[derive(Args, Clone, Copy)]
pub struct NetworkArgs {
    #[arg(long, default_value_t = 3)]
    /// Amount of neurons in each hidden layer.
    pub hidden_size: usize,

    #[arg(long, default_value_t = 1)]
    /// Amount of hidden layers.
    ///
    /// If set to 0 then inputs are connected to outputs directly.
    pub hidden_layers: usize,

    #[arg(long)]
    /// Seed of the weights and biases random generator.
    pub seed: Option<u64>
}

impl NetworkArgs {
    /// Create randomly initialized network with given inputs and outputs amount.
    pub fn create(&self, input_size: usize, output_size: usize) -> Result<Network64, NetworkError> {
        let mut sampler = match self.seed {
            Some(seed) => FastrandSampler::with_seed(seed),
            None => FastrandSampler::new()
        };

        Network::create_with(input_size, output_size, self.hidden_size, self.hidden_layers, &mut sampler)
    }
}

#[derive(Args, Clone, Copy)]
pub struct TrainingArgs {
    #[arg(long, short, default_value_t = 10000)]
    /// Amount of passes over the training examples.
    pub epochs: usize,

    #[arg(long, default_value_t = 1000)]
    /// Amount of epochs between progress reports.
    ///
    /// If set to 0 then only final result is reported.
    pub report_interval: usize,

    #[arg(long)]
    /// Learning rate of the weights.
    pub gamma: Option<f64>,

    #[arg(long)]
    /// Learning rate of the biases.
    pub gamma_b: Option<f64>,

    #[arg(long)]
    /// Scale of the learning rates used to re-apply previous batch's gradient.
    pub momentum: Option<f64>,

    #[arg(long)]
    /// Amount of examples merged into a single gradient.
    pub batch_size: Option<usize>,

    #[arg(long, default_value_t = 0)]
    /// Amount of threads used to calculate gradients of a batch.
    ///
    /// If set to 0 then all the computations will be done in the current thread.
    pub threads: usize,

    #[arg(long, short, action = clap::ArgAction::Count)]
    /// Log training progress (`-v` per epoch, `-vv` per batch).
    pub verbose: u8
}

impl TrainingArgs {
    /// Override values of the given config by the command line options.
    pub fn config(&self, mut config: TrainingConfig<f64>) -> TrainingConfig<f64> {
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }

        if let Some(gamma_b) = self.gamma_b {
            config = config.with_bias_gamma(gamma_b);
        }

        if let Some(momentum) = self.momentum {
            config = config.with_momentum(momentum);
        }

        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }

        config
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE
    };

    // Fails only if another subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

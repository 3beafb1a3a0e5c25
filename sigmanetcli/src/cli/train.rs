use std::path::PathBuf;

use anyhow::Context;
use colorful::Colorful;

use sigmanetlib::prelude::*;

use super::{NetworkArgs, TrainingArgs};

pub fn xor(network: NetworkArgs, training: TrainingArgs) -> anyhow::Result<()> {
    let examples: Vec<Example<f64>> = vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0])
    ];

    let mut network = network.create(2, 1)?;

    train(&mut network, &examples, training.config(TrainingConfig::default()), training)?;

    println!();

    for (input, expected) in &examples {
        let output = network.output(input)?;

        println!("  {input:?} -> {} (expected {expected:?})", format!("{:.4}", output[0]).yellow());
    }

    Ok(())
}

pub fn dataset(
    path: PathBuf,
    config: Option<PathBuf>,
    dump: bool,
    network: NetworkArgs,
    training: TrainingArgs
) -> anyhow::Result<()> {
    let path = path.canonicalize().unwrap_or(path);

    println!("⏳ Reading examples from {path:?}...");

    let examples = std::fs::read_to_string(&path)
        .context("Failed to read examples file")?;

    let examples = serde_json::from_str::<Vec<Example<f64>>>(&examples)
        .context("Failed to parse examples file")?;

    let Some((input, expected)) = examples.first() else {
        anyhow::bail!("Examples file doesn't contain any examples");
    };

    let base_config = match config {
        Some(config) => {
            let config = std::fs::read_to_string(config)
                .context("Failed to read training config file")?;

            serde_json::from_str::<TrainingConfig<f64>>(&config)
                .context("Failed to parse training config file")?
        }

        None => TrainingConfig::default()
    };

    let mut network = network.create(input.len(), expected.len())?;

    println!("{}", format!("✅ Loaded {} examples", examples.len()).green());

    train(&mut network, &examples, training.config(base_config), training)?;

    if dump {
        println!();
        println!("{network}");
    }

    Ok(())
}

/// Train the network and report dataset error every `report_interval` epochs.
pub fn train(
    network: &mut Network64,
    examples: &[Example<f64>],
    config: TrainingConfig<f64>,
    training: TrainingArgs
) -> anyhow::Result<()> {
    println!("            Dimensions: {}", format!("{:?}", network.dimensions()).yellow());
    println!("            Parameters: {}", format!("{}", network.params()).yellow());
    println!("  Learning rates (w/b): {}", format!("{} / {}", config.gamma, config.gamma_b).yellow());
    println!("              Momentum: {}", format!("{}", config.momentum).yellow());
    println!("            Batch size: {}", format!("{}", config.batch_size).yellow());

    let initial_error = network.error_dataset(examples)?;

    println!();
    println!("⏳ Initial error: {}", format!("{initial_error:.8}").yellow());

    let mut trainer = Trainer::with_device(config, CPUDevice::multithreaded(training.threads));

    let interval = match training.report_interval {
        0 => training.epochs.max(1),
        interval => interval
    };

    let now = std::time::Instant::now();
    let mut epoch = 0;

    while epoch < training.epochs {
        let epochs = interval.min(training.epochs - epoch);

        if let Err(err) = trainer.train(network, examples, epochs) {
            eprintln!("{}", format!("🧯 Failed to train the network: {err}").red());

            return Err(err.into());
        }

        epoch += epochs;

        if epoch < training.epochs {
            let error = network.error_dataset(examples)?;

            println!("⏳ Epoch {epoch}/{}: error = {}", training.epochs, format!("{error:.8}").yellow());
        }
    }

    let error = network.error_dataset(examples)?;

    println!("{}", format!("✅ Trained for {} epochs ({} batches) in {:.1} seconds", training.epochs, trainer.batches(), now.elapsed().as_secs_f32()).green());
    println!("   Final error: {}", format!("{error:.8}").yellow());

    Ok(())
}

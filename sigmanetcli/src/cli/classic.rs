use colorful::Colorful;

use sigmanetlib::prelude::*;

const INPUT: [f64; 2] = [0.05, 0.10];
const EXPECTED: [f64; 2] = [0.01, 0.99];

pub fn execute(learn_rate: f64, layout: WeightLayout) -> anyhow::Result<()> {
    let mut network = Network64::from_parts_with_layout(
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
    )?;

    println!("{}", format!("📖 Reference network, weights read as {layout:?}").blue());
    println!();
    print!("{network}");
    println!();

    let activations = network.eval(&INPUT)?;

    for (i, layer) in activations.iter().enumerate() {
        println!("  Layer {i} activations: {}", format!("{layer:.6?}").yellow());
    }

    let error = network.error(&INPUT, &EXPECTED)?;

    println!();
    println!("  Error: {}", format!("{error:.8}").yellow());

    let gradient = network.gradient(&INPUT, &EXPECTED)?;

    println!();

    for (i, deltas) in gradient.deltas().iter().enumerate() {
        println!("  Layer {i} deltas: {}", format!("{deltas:.8?}").yellow());
    }

    for (i, weights) in gradient.weights().iter().enumerate() {
        println!("  Matrix {i} weight gradients: {}", format!("{weights:.8?}").yellow());
    }

    network.apply(&gradient, learn_rate, learn_rate)?;

    let updated_error = network.error(&INPUT, &EXPECTED)?;

    println!();

    if updated_error < error {
        println!("{}", format!("✅ Error after one step with rate {learn_rate}: {updated_error:.8}").green());
    } else {
        println!("{}", format!("🧯 Error did not decrease after one step with rate {learn_rate}: {updated_error:.8}").red());
    }

    Ok(())
}

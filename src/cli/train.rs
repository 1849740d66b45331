//! Train command - fit the classifier on a historical CSV export

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::classifier::{self, TrainConfig, FEATURE_NAMES};
use crate::dataset;

pub fn run(
    model_path: &Path,
    data: &Path,
    test_fraction: f64,
    seed: u64,
    max_iterations: usize,
) -> Result<()> {
    println!("🧠 Training dropout classifier...\n");

    let samples = dataset::load_csv(data)?;
    let at_risk = samples.iter().filter(|s| s.at_risk).count();
    println!(
        "  Dataset: {} rows ({} at risk, {} not at risk)",
        style(samples.len()).cyan(),
        style(at_risk).red(),
        style(samples.len() - at_risk).green()
    );

    let config = TrainConfig {
        test_fraction,
        seed,
        max_iterations,
        ..TrainConfig::default()
    };
    let outcome = classifier::train(&samples, &config)?;

    println!(
        "  Converged after {} iterations\n",
        style(outcome.iterations).cyan()
    );
    println!("{}\n", outcome.report);

    println!("  Coefficients:");
    for (name, weight) in FEATURE_NAMES.iter().zip(outcome.model.weights()) {
        println!("    {:<22} {:>9.4}", name, weight);
    }
    println!("    {:<22} {:>9.4}", "bias", outcome.model.bias());

    classifier::save_model(&outcome.model, model_path)?;
    println!(
        "\n✅ Model saved to {}",
        style(model_path.display()).cyan()
    );

    Ok(())
}

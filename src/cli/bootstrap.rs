//! Bootstrap command - train an initial model on synthetic data
//!
//! Lets the risk pipeline work before any real history exists. The
//! sample predictions at the end are a quick sanity read on the fit.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::classifier::{self, FeatureVector, TrainConfig};

/// Illustrative students printed after bootstrapping.
const SAMPLE_CASES: [(f64, f64, u32, u32, &str); 3] = [
    (85.0, 7.5, 2, 0, "Good student"),
    (60.0, 5.0, 4, 1, "Average student"),
    (45.0, 3.5, 6, 2, "At-risk student"),
];

pub fn run(model_path: &Path, samples: usize, seed: u64) -> Result<()> {
    println!("🧠 Bootstrapping model from synthetic data...\n");

    let dataset = classifier::generate(samples, seed);
    println!(
        "  Generated {} samples (seed {})",
        style(dataset.len()).cyan(),
        seed
    );

    let outcome = classifier::train(&dataset, &TrainConfig::default())?;
    println!("\n{}\n", outcome.report);

    classifier::save_model(&outcome.model, model_path)?;
    println!("✅ Model saved to {}\n", style(model_path.display()).cyan());

    println!("  Sample predictions:");
    for (attendance, cgpa, failures, issues, label) in SAMPLE_CASES {
        let prediction = outcome
            .model
            .predict(&FeatureVector::new(attendance, cgpa, failures, issues))?;
        println!(
            "    {:<16} attendance {:>5.1}%, CGPA {:>4.1} → {:>6.1}% ({})",
            label,
            attendance,
            cgpa,
            prediction.probability * 100.0,
            super::tier_label(prediction.tier)
        );
    }
    println!("\n  Retrain on a real export with `edurisk train` once data exists.");

    Ok(())
}

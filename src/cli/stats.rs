//! Stats command - show artifact status and fitted coefficients

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::classifier::{store::load_artifact, ModelError};
use crate::store::{RedbStore, StudentStore};

pub fn run(model_path: &Path, store_path: &Path) -> Result<()> {
    println!("\nEdurisk Status\n");

    println!("  Model: {}", style(model_path.display()).cyan());
    match load_artifact(model_path) {
        Ok(artifact) => {
            println!("  {} Trained model present", style("[OK]").green());
            println!("      Trained at: {}", style(&artifact.trained_at).dim());
            println!("      Coefficients:");
            for (name, weight) in artifact.feature_names.iter().zip(&artifact.weights) {
                println!("        {:<22} {:>9.4}", name, weight);
            }
            println!("        {:<22} {:>9.4}", "bias", artifact.bias);
        }
        Err(ModelError::NotFound { .. }) => {
            println!(
                "  {} No model yet. Run {}",
                style("[--]").dim(),
                style("edurisk bootstrap").cyan()
            );
        }
        Err(e) => return Err(e.into()),
    }

    println!();
    println!("  Store: {}", style(store_path.display()).cyan());
    if store_path.exists() {
        let store = RedbStore::open(store_path)?;
        let records = store.fetch_all()?;
        let scored = records.iter().filter(|r| r.risk_tier.is_some()).count();
        println!(
            "  {} {} students ({} scored)",
            style("[OK]").green(),
            style(records.len()).cyan(),
            scored
        );
    } else {
        println!(
            "  {} No store yet. Run {}",
            style("[--]").dim(),
            style("edurisk seed").cyan()
        );
    }
    println!();

    Ok(())
}

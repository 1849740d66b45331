//! Update command - batch risk refresh for every stored student

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::batch;
use crate::classifier;
use crate::store::RedbStore;

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("  [{bar:40.cyan/blue}] {pos}/{len} students")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

pub fn run(model_path: &Path, store_path: &Path) -> Result<()> {
    println!("🔄 Starting batch risk prediction...\n");

    let model = classifier::load_model(model_path)?;
    let store = RedbStore::open(store_path)?;

    let bar = ProgressBar::new(0).with_style(create_bar_style());
    let summary = batch::run_batch(&store, &model, |processed, total| {
        bar.set_length(total as u64);
        bar.set_position(processed as u64);
    })?;
    bar.finish_and_clear();

    println!(
        "✅ Successfully updated {} students!\n",
        style(summary.processed).cyan()
    );
    println!("📊 Risk distribution:");
    println!("   🔴 HIGH:   {}", summary.high);
    println!("   🟡 MEDIUM: {}", summary.medium);
    println!("   🟢 LOW:    {}", summary.low);

    Ok(())
}

//! Seed command - populate a local store with synthetic students
//!
//! For demos and local evaluation only; real deployments point
//! `--store` at the institution's record database file.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::classifier::synthetic;
use crate::store::RedbStore;

pub fn run(store_path: &Path, count: usize, seed: u64) -> Result<()> {
    println!("🌱 Seeding student store...\n");

    let store = RedbStore::open(store_path)?;
    let students = synthetic::generate_students(count, seed);
    for student in &students {
        store.insert(student)?;
    }

    println!(
        "✅ Inserted {} students into {}",
        style(students.len()).cyan(),
        style(store_path.display()).cyan()
    );
    println!("\n  Run `edurisk update` to score them.");

    Ok(())
}

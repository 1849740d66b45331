//! Edurisk - Student dropout risk prediction CLI
//!
//! A local-first tool that trains a logistic dropout classifier and
//! applies tiered risk scoring to student records.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = edurisk::cli::Cli::parse();
    edurisk::cli::run(cli)
}

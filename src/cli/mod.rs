//! CLI command definitions and handlers

mod bootstrap;
mod predict;
mod seed;
mod stats;
mod train;
mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config;

/// Edurisk - student dropout risk prediction
///
/// 100% LOCAL - predictions, training, and the student store all stay
/// on your machine.
#[derive(Parser, Debug)]
#[command(name = "edurisk")]
#[command(
    version,
    about = "Predict student dropout risk with a tiered logistic classifier",
    long_about = "Edurisk trains a logistic classifier on four academic signals \
(attendance, CGPA, failed assessments, disciplinary issues) and maps dropout \
probability to LOW / MEDIUM / HIGH risk tiers.\n\n\
100% LOCAL - predictions, training, and the student store all stay on your machine.",
    after_help = "\
Examples:
  edurisk bootstrap                          Train an initial model on synthetic data
  edurisk train --data training_data.csv     Train on a real historical export
  edurisk predict --attendance 85 --cgpa 7.5 Score one student
  edurisk seed --count 120                   Populate a local demo store
  edurisk update                             Refresh risk tiers for every student
  edurisk stats                              Show the current model artifact"
)]
pub struct Cli {
    /// Path to the model artifact (default: data dir, or edurisk.toml)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Path to the student store database (default: data dir, or edurisk.toml)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a CSV export of historical student data
    #[command(after_help = "\
The dataset must carry the columns:
  attendancePercent, currentCGPA, failedAssessments, disciplinaryIssues, dropout

Examples:
  edurisk train --data training_data.csv
  edurisk train --data export.csv --test-fraction 0.3 --seed 7")]
    Train {
        /// CSV file with labeled historical data
        #[arg(long)]
        data: PathBuf,

        /// Fraction of each class held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_fraction: f64,

        /// Seed for the stratified split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Maximum optimizer iterations
        #[arg(long, default_value = "1000")]
        max_iterations: usize,
    },

    /// Train an initial model on synthetic data (no history needed)
    ///
    /// Bootstraps a deployable model before real data accumulates.
    /// Retrain with `edurisk train` once an export exists.
    Bootstrap {
        /// Synthetic samples to generate
        #[arg(long, default_value = "1000")]
        samples: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Predict dropout risk for a single student
    #[command(after_help = "\
Examples:
  edurisk predict --attendance 85 --cgpa 7.5
  edurisk predict --attendance 45 --cgpa 3.5 --failures 6 --issues 2")]
    Predict {
        /// Attendance percentage (0-100)
        #[arg(long)]
        attendance: f64,

        /// Current CGPA (0-10)
        #[arg(long)]
        cgpa: f64,

        /// Number of failed assessments
        #[arg(long, default_value = "0")]
        failures: u32,

        /// Number of disciplinary issues
        #[arg(long, default_value = "0")]
        issues: u32,
    },

    /// Recompute risk tier and probability for every stored student
    ///
    /// Scores records sequentially in store order and writes each
    /// result back. Failed-assessment counts are not tracked on store
    /// records yet; this path scores everyone with 0 failures.
    Update,

    /// Populate the local store with synthetic student records
    Seed {
        /// Number of students to create
        #[arg(long, default_value = "120")]
        count: usize,

        /// Generator seed
        #[arg(long, default_value = "7")]
        seed: u64,
    },

    /// Show model artifact status and fitted coefficients
    Stats,

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let project = config::load_project_config(Path::new("."));
    let model_path = config::resolve_model_path(cli.model, &project);
    let store_path = config::resolve_store_path(cli.store, &project);

    match cli.command {
        Commands::Train {
            data,
            test_fraction,
            seed,
            max_iterations,
        } => train::run(&model_path, &data, test_fraction, seed, max_iterations),

        Commands::Bootstrap { samples, seed } => bootstrap::run(&model_path, samples, seed),

        Commands::Predict {
            attendance,
            cgpa,
            failures,
            issues,
        } => predict::run(&model_path, attendance, cgpa, failures, issues),

        Commands::Update => update::run(&model_path, &store_path),

        Commands::Seed { count, seed } => seed::run(&store_path, count, seed),

        Commands::Stats => stats::run(&model_path, &store_path),

        Commands::Version => {
            println!("edurisk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Styled tier name for terminal output.
fn tier_label(tier: crate::models::RiskTier) -> String {
    use console::style;
    use crate::models::RiskTier;

    match tier {
        RiskTier::High => style("HIGH").red().bold().to_string(),
        RiskTier::Medium => style("MEDIUM").yellow().to_string(),
        RiskTier::Low => style("LOW").green().to_string(),
    }
}

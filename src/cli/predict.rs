//! Predict command - score a single student

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::classifier::{self, FeatureVector};

pub fn run(
    model_path: &Path,
    attendance: f64,
    cgpa: f64,
    failures: u32,
    issues: u32,
) -> Result<()> {
    let model = classifier::load_model(model_path)?;
    let prediction = model.predict(&FeatureVector::new(attendance, cgpa, failures, issues))?;

    println!("\nDropout Risk Prediction\n");
    println!("  Attendance:           {attendance}%");
    println!("  CGPA:                 {cgpa}");
    println!("  Failed assessments:   {failures}");
    println!("  Disciplinary issues:  {issues}");
    println!();
    println!(
        "  Dropout probability:  {}",
        style(format!("{:.1}%", prediction.probability * 100.0)).bold()
    );
    println!("  Risk tier:            {}", super::tier_label(prediction.tier));
    println!(
        "  Prediction:           {}",
        if prediction.at_risk {
            style("At risk").red().to_string()
        } else {
            style("Not at risk").green().to_string()
        }
    );
    println!(
        "  Confidence:           {:.1}%",
        prediction.confidence * 100.0
    );
    println!();

    Ok(())
}

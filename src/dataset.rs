//! Training dataset loading
//!
//! Reads the tabular training export: a CSV with the five named
//! columns the academic records system exports. Any missing or
//! malformed input is fatal before fitting starts; there is no partial
//! training.

use std::path::Path;

use tracing::info;

use crate::classifier::{FeatureVector, LabeledSample, ModelError};

/// Column names the dataset must carry, in any order. Extra columns
/// are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "attendancePercent",
    "currentCGPA",
    "failedAssessments",
    "disciplinaryIssues",
    "dropout",
];

/// Load labeled samples from a CSV export.
pub fn load_csv(path: &Path) -> Result<Vec<LabeledSample>, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ModelError::TrainingData(format!("cannot read {}: {e}", path.display()))
    })?;

    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| ModelError::TrainingData(format!("{} is empty", path.display())))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        *slot = columns.iter().position(|c| c == name).ok_or_else(|| {
            ModelError::TrainingData(format!(
                "missing column `{name}` in {} (found: {})",
                path.display(),
                columns.join(", ")
            ))
        })?;
    }
    let [attendance_col, cgpa_col, failures_col, issues_col, dropout_col] = indices;

    let mut samples = Vec::new();
    for (line_index, line) in lines {
        let row = line_index + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < columns.len() {
            return Err(ModelError::TrainingData(format!(
                "row {row} has {} fields, expected {}",
                fields.len(),
                columns.len()
            )));
        }

        let attendance = parse_f64(fields[attendance_col], "attendancePercent", row)?;
        let cgpa = parse_f64(fields[cgpa_col], "currentCGPA", row)?;
        let failures = parse_u32(fields[failures_col], "failedAssessments", row)?;
        let issues = parse_u32(fields[issues_col], "disciplinaryIssues", row)?;
        let dropout = match fields[dropout_col] {
            "0" => false,
            "1" => true,
            other => {
                return Err(ModelError::TrainingData(format!(
                    "row {row}: dropout must be 0 or 1, got `{other}`"
                )))
            }
        };

        samples.push(LabeledSample::new(
            FeatureVector::new(attendance, cgpa, failures, issues),
            dropout,
        ));
    }

    if samples.is_empty() {
        return Err(ModelError::TrainingData(format!(
            "{} contains a header but no rows",
            path.display()
        )));
    }

    info!(rows = samples.len(), path = %path.display(), "loaded training dataset");
    Ok(samples)
}

fn parse_f64(field: &str, column: &str, row: usize) -> Result<f64, ModelError> {
    field.parse().map_err(|_| {
        ModelError::TrainingData(format!("row {row}: invalid {column} value `{field}`"))
    })
}

fn parse_u32(field: &str, column: &str, row: usize) -> Result<u32, ModelError> {
    field.parse().map_err(|_| {
        ModelError::TrainingData(format!("row {row}: invalid {column} value `{field}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_valid_csv() {
        let file = write_csv(
            "attendancePercent,currentCGPA,failedAssessments,disciplinaryIssues,dropout\n\
             92.5,8.1,0,0,0\n\
             48.0,3.9,4,2,1\n",
        );
        let samples = load_csv(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].features.values(), &[92.5, 8.1, 0.0, 0.0]);
        assert!(!samples[0].at_risk);
        assert!(samples[1].at_risk);
    }

    #[test]
    fn test_column_order_is_flexible() {
        let file = write_csv(
            "dropout,currentCGPA,attendancePercent,failedAssessments,disciplinaryIssues,extra\n\
             1,4.2,55.0,3,1,ignored\n",
        );
        let samples = load_csv(file.path()).unwrap();
        assert_eq!(samples[0].features.values(), &[55.0, 4.2, 3.0, 1.0]);
        assert!(samples[0].at_risk);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_csv(Path::new("/nonexistent/training.csv")).unwrap_err();
        assert!(matches!(err, ModelError::TrainingData(_)));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv("attendancePercent,currentCGPA,dropout\n90,8,0\n");
        let err = load_csv(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failedAssessments"), "{message}");
    }

    #[test]
    fn test_bad_value_reports_row() {
        let file = write_csv(
            "attendancePercent,currentCGPA,failedAssessments,disciplinaryIssues,dropout\n\
             92.5,8.1,0,0,0\n\
             oops,3.9,4,2,1\n",
        );
        let message = load_csv(file.path()).unwrap_err().to_string();
        assert!(message.contains("row 3"), "{message}");
        assert!(message.contains("attendancePercent"), "{message}");
    }

    #[test]
    fn test_bad_label_is_fatal() {
        let file = write_csv(
            "attendancePercent,currentCGPA,failedAssessments,disciplinaryIssues,dropout\n\
             92.5,8.1,0,0,yes\n",
        );
        let message = load_csv(file.path()).unwrap_err().to_string();
        assert!(message.contains("dropout must be 0 or 1"), "{message}");
    }

    #[test]
    fn test_header_only_is_fatal() {
        let file =
            write_csv("attendancePercent,currentCGPA,failedAssessments,disciplinaryIssues,dropout\n");
        assert!(matches!(
            load_csv(file.path()),
            Err(ModelError::TrainingData(_))
        ));
    }
}

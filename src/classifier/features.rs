//! Feature encoding for the dropout classifier
//!
//! Maps a raw student record to a fixed-order numeric vector. Absent
//! fields default to 0. No range validation happens here; out-of-range
//! inputs pass through unchanged.

use crate::models::StudentRecord;

/// Number of input features the classifier consumes.
pub const FEATURE_COUNT: usize = 4;

/// Feature names in vector order, used for coefficient reporting and
/// the persisted artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "attendance_percent",
    "cgpa",
    "failed_assessments",
    "disciplinary_issues",
];

/// Fixed-order feature vector: attendance %, CGPA, failed assessment
/// count, disciplinary issue count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(
        attendance_percent: f64,
        cgpa: f64,
        failed_assessments: u32,
        disciplinary_issues: u32,
    ) -> Self {
        Self {
            values: [
                attendance_percent,
                cgpa,
                f64::from(failed_assessments),
                f64::from(disciplinary_issues),
            ],
        }
    }

    /// Build features from a store record, defaulting absent fields to 0.
    ///
    /// The failed-assessment count is not carried on the record itself
    /// and must be supplied by the caller.
    pub fn from_record(record: &StudentRecord, failed_assessments: u32) -> Self {
        Self::new(
            record.attendance_percent.unwrap_or(0.0),
            record.cgpa.unwrap_or(0.0),
            failed_assessments,
            record.disciplinary_issues.unwrap_or(0),
        )
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

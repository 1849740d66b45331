//! Core data models for Edurisk
//!
//! Shared between the classifier, the record store, and the CLI.

use serde::{Deserialize, Serialize};

/// Risk tiers derived from dropout probability
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[default]
    Low,
    Medium,
    High,
}

/// Probability at or above which a student is tiered HIGH.
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;

/// Probability at or above which a student is tiered MEDIUM.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;

impl RiskTier {
    /// Map a dropout probability to a tier.
    ///
    /// Boundary values belong to the higher tier: exactly 0.70 is HIGH,
    /// exactly 0.40 is MEDIUM. Pure and total over [0, 1] - the same
    /// probability always yields the same tier.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// A student row as held by the record store.
///
/// The classifier only reads the signal fields and writes back the two
/// risk output fields via [`RiskUpdate`]; record lifecycle belongs to
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Attendance percentage, 0-100. Absent means "not yet recorded".
    #[serde(default)]
    pub attendance_percent: Option<f64>,
    /// Current CGPA on a 0-10 scale.
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub disciplinary_issues: Option<u32>,
    /// Last computed risk tier, written by batch scoring.
    #[serde(default)]
    pub risk_tier: Option<RiskTier>,
    /// Last computed dropout probability, written by batch scoring.
    #[serde(default)]
    pub risk_probability: Option<f64>,
}

/// Targeted update of a record's risk output fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskUpdate {
    pub risk_tier: RiskTier,
    pub probability: f64,
}

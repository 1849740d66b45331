//! Logistic dropout model
//!
//! Weight vector + bias, the sole fitted state. Inference is a dot
//! product, a sigmoid, and a 0.5 decision boundary.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;
use super::ModelError;
use crate::models::RiskTier;

/// Fitted parameters of the dropout classifier.
///
/// Immutable once produced: a training run returns a wholly new value.
/// A model is identified by its artifact path, not an in-memory
/// singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropoutModel {
    weights: Vec<f64>,
    bias: f64,
}

impl DropoutModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Dropout probability for a feature vector.
    ///
    /// Fails with [`ModelError::DimensionMismatch`] when the vector
    /// length differs from the weight length; the input is never
    /// truncated or padded to fit.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let values = features.values();
        if values.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: values.len(),
            });
        }

        let score: f64 = self
            .weights
            .iter()
            .zip(values.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        Ok(sigmoid(score))
    }

    /// Full prediction: probability, tier, binary label, confidence.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        Ok(Prediction::from_probability(self.probability(features)?))
    }
}

/// Result of scoring a single student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Dropout likelihood in (0, 1).
    pub probability: f64,
    /// Tier derived from the probability thresholds.
    pub tier: RiskTier,
    /// Binary at-risk label at the 0.5 decision boundary.
    pub at_risk: bool,
    /// max(p, 1 - p): how far the probability sits from the boundary.
    pub confidence: f64,
}

impl Prediction {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            tier: RiskTier::from_probability(probability),
            at_risk: probability >= 0.5,
            confidence: probability.max(1.0 - probability),
        }
    }
}

/// Standard logistic function.
pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_is_sigmoid_of_score() {
        let model = DropoutModel::new(vec![0.0, 0.0, 0.0, 0.0], 0.0);
        let v = FeatureVector::new(85.0, 7.5, 0, 0);
        let p = model.probability(&v).unwrap();
        assert!((p - 0.5).abs() < 1e-12);

        let model = DropoutModel::new(vec![1.0, 0.0, 0.0, 0.0], -80.0);
        let p = model.probability(&v).unwrap();
        assert!((p - sigmoid(5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let model = DropoutModel::new(vec![0.5, -0.5, 0.25], 0.0);
        let v = FeatureVector::new(85.0, 7.5, 0, 0);
        match model.probability(&v) {
            Err(ModelError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_prediction_fields_are_consistent() {
        let pred = Prediction::from_probability(0.82);
        assert_eq!(pred.tier, RiskTier::High);
        assert!(pred.at_risk);
        assert!((pred.confidence - 0.82).abs() < 1e-12);

        let pred = Prediction::from_probability(0.18);
        assert_eq!(pred.tier, RiskTier::Low);
        assert!(!pred.at_risk);
        assert!((pred.confidence - 0.82).abs() < 1e-12);
    }
}

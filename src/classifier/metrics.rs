//! Evaluation metrics for trained models
//!
//! Accuracy, per-class precision/recall, and a 2x2 confusion matrix,
//! computed on the held-out partition after training. Diagnostic only;
//! inference never needs a report.

use serde::{Deserialize, Serialize};

/// 2x2 confusion matrix for the binary dropout label.
///
/// "Positive" is the at-risk class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    /// Count outcomes at a decision threshold.
    pub fn from_predictions(probabilities: &[f64], labels: &[bool], threshold: f64) -> Self {
        let mut matrix = Self::default();
        for (&p, &at_risk) in probabilities.iter().zip(labels.iter()) {
            let predicted = p >= threshold;
            match (at_risk, predicted) {
                (false, false) => matrix.true_negative += 1,
                (false, true) => matrix.false_positive += 1,
                (true, false) => matrix.false_negative += 1,
                (true, true) => matrix.true_positive += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }
}

/// Precision/recall for one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    /// Number of true instances of this class in the evaluation set.
    pub support: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Evaluation report produced alongside a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub accuracy: f64,
    pub not_at_risk: ClassMetrics,
    pub at_risk: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl EvalReport {
    /// Build a report from probabilities and true labels at the 0.5
    /// decision boundary.
    pub fn from_predictions(probabilities: &[f64], labels: &[bool]) -> Self {
        let m = ConfusionMatrix::from_predictions(probabilities, labels, 0.5);

        let accuracy = ratio(m.true_negative + m.true_positive, m.total());

        // Class 0: "predicted negative" is the positive call for this class.
        let not_at_risk = ClassMetrics {
            precision: ratio(m.true_negative, m.true_negative + m.false_negative),
            recall: ratio(m.true_negative, m.true_negative + m.false_positive),
            support: m.true_negative + m.false_positive,
        };

        let at_risk = ClassMetrics {
            precision: ratio(m.true_positive, m.true_positive + m.false_positive),
            recall: ratio(m.true_positive, m.true_positive + m.false_negative),
            support: m.true_positive + m.false_negative,
        };

        Self {
            accuracy,
            not_at_risk,
            at_risk,
            confusion: m,
        }
    }
}

impl std::fmt::Display for EvalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Accuracy: {:.1}%", self.accuracy * 100.0)?;
        writeln!(f)?;
        writeln!(
            f,
            "  {:<12} {:>10} {:>10} {:>10}",
            "class", "precision", "recall", "support"
        )?;
        writeln!(
            f,
            "  {:<12} {:>9.1}% {:>9.1}% {:>10}",
            "not at risk",
            self.not_at_risk.precision * 100.0,
            self.not_at_risk.recall * 100.0,
            self.not_at_risk.support
        )?;
        writeln!(
            f,
            "  {:<12} {:>9.1}% {:>9.1}% {:>10}",
            "at risk",
            self.at_risk.precision * 100.0,
            self.at_risk.recall * 100.0,
            self.at_risk.support
        )?;
        writeln!(f)?;
        writeln!(f, "  Confusion matrix (rows = actual, cols = predicted):")?;
        writeln!(
            f,
            "    [{:>5} {:>5}]",
            self.confusion.true_negative, self.confusion.false_positive
        )?;
        write!(
            f,
            "    [{:>5} {:>5}]",
            self.confusion.false_negative, self.confusion.true_positive
        )
    }
}

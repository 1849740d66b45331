//! Training for the dropout classifier
//!
//! Fits the logistic model with deterministic full-batch gradient
//! descent: a seeded stratified split, per-column standardization, and
//! a fixed iteration order. Identical samples + seed always produce
//! bit-identical weights.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::features::{FeatureVector, FEATURE_COUNT};
use super::metrics::EvalReport;
use super::model::{sigmoid, DropoutModel};
use super::ModelError;

/// A feature vector with its binary dropout label. Training-only;
/// labels are never persisted alongside a trained model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub at_risk: bool,
}

impl LabeledSample {
    pub fn new(features: FeatureVector, at_risk: bool) -> Self {
        Self { features, at_risk }
    }
}

/// Training configuration
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Fraction of each class held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the stratified shuffle.
    pub seed: u64,
    /// Upper bound on gradient descent iterations.
    pub max_iterations: usize,
    /// Step size on standardized features.
    pub learning_rate: f64,
    /// L2 penalty strength; 0 disables regularization.
    pub l2: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            max_iterations: 1000,
            learning_rate: 0.1,
            l2: 0.0,
        }
    }
}

/// Trained model plus its held-out evaluation report.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub model: DropoutModel,
    pub report: EvalReport,
    /// Gradient descent iterations actually run.
    pub iterations: usize,
}

/// Stop once every gradient component is below this.
const GRADIENT_TOLERANCE: f64 = 1e-6;

/// Fit a dropout model on labeled samples.
///
/// Both classes must be present; an empty or single-class dataset is a
/// [`ModelError::TrainingData`] before any fitting starts.
pub fn train(samples: &[LabeledSample], config: &TrainConfig) -> Result<TrainOutcome, ModelError> {
    if samples.is_empty() {
        return Err(ModelError::TrainingData("no training samples".into()));
    }
    let positives = samples.iter().filter(|s| s.at_risk).count();
    if positives == 0 || positives == samples.len() {
        return Err(ModelError::TrainingData(
            "training data must contain both at-risk and not-at-risk samples".into(),
        ));
    }

    let (train_set, test_set) = stratified_split(samples, config.test_fraction, config.seed);
    info!(
        train = train_set.len(),
        test = test_set.len(),
        at_risk = positives,
        "split training data"
    );

    let scaler = ColumnScaler::fit(&train_set);
    let x: Vec<[f64; FEATURE_COUNT]> = train_set
        .iter()
        .map(|s| scaler.transform(s.features.values()))
        .collect();
    let y: Vec<f64> = train_set
        .iter()
        .map(|s| if s.at_risk { 1.0 } else { 0.0 })
        .collect();

    let n = x.len() as f64;
    let mut w = [0.0f64; FEATURE_COUNT];
    let mut b = 0.0f64;
    let mut iterations = 0;

    for iteration in 0..config.max_iterations {
        iterations = iteration + 1;

        let mut grad_w = [0.0f64; FEATURE_COUNT];
        let mut grad_b = 0.0f64;

        for (xi, &yi) in x.iter().zip(y.iter()) {
            let score: f64 = w.iter().zip(xi.iter()).map(|(wj, xj)| wj * xj).sum::<f64>() + b;
            let diff = sigmoid(score) - yi;
            for (gj, xj) in grad_w.iter_mut().zip(xi.iter()) {
                *gj += diff * xj;
            }
            grad_b += diff;
        }

        for (gj, wj) in grad_w.iter_mut().zip(w.iter()) {
            *gj = *gj / n + config.l2 * wj;
        }
        grad_b /= n;

        let max_grad = grad_w
            .iter()
            .chain(std::iter::once(&grad_b))
            .fold(0.0f64, |acc, g| acc.max(g.abs()));

        if iteration % 100 == 0 {
            debug!(iteration, max_grad, "descent step");
        }

        if max_grad < GRADIENT_TOLERANCE {
            break;
        }

        for (wj, gj) in w.iter_mut().zip(grad_w.iter()) {
            *wj -= config.learning_rate * gj;
        }
        b -= config.learning_rate * grad_b;
    }

    let (weights, bias) = scaler.unscale(&w, b);
    let model = DropoutModel::new(weights, bias);
    info!(iterations, "training converged or hit iteration cap");

    // Held-out evaluation; a test fraction that rounds to zero falls
    // back to reporting on the training partition.
    let eval_set: &[&LabeledSample] = if test_set.is_empty() {
        &train_set
    } else {
        &test_set
    };
    let mut probabilities = Vec::with_capacity(eval_set.len());
    for sample in eval_set {
        probabilities.push(model.probability(&sample.features)?);
    }
    let labels: Vec<bool> = eval_set.iter().map(|s| s.at_risk).collect();
    let report = EvalReport::from_predictions(&probabilities, &labels);

    Ok(TrainOutcome {
        model,
        report,
        iterations,
    })
}

/// Split samples into train/test partitions preserving the class ratio.
///
/// Each class is shuffled independently with the seeded RNG and the
/// rounded test fraction is taken off the front. Output order is
/// deterministic: not-at-risk first, then at-risk.
fn stratified_split(
    samples: &[LabeledSample],
    test_fraction: f64,
    seed: u64,
) -> (Vec<&LabeledSample>, Vec<&LabeledSample>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [false, true] {
        let mut class_samples: Vec<&LabeledSample> =
            samples.iter().filter(|s| s.at_risk == class).collect();
        class_samples.shuffle(&mut rng);

        let test_count = (class_samples.len() as f64 * test_fraction).round() as usize;
        let test_count = test_count.min(class_samples.len());
        test.extend_from_slice(&class_samples[..test_count]);
        train.extend_from_slice(&class_samples[test_count..]);
    }

    (train, test)
}

/// Per-column standardization fitted on the training partition.
///
/// Gradient descent runs on z-scores; the fitted weights are mapped
/// back to the original feature scale afterwards so inference never
/// needs the scaler.
struct ColumnScaler {
    mean: [f64; FEATURE_COUNT],
    std: [f64; FEATURE_COUNT],
}

impl ColumnScaler {
    fn fit(samples: &[&LabeledSample]) -> Self {
        let n = samples.len() as f64;
        let mut mean = [0.0f64; FEATURE_COUNT];
        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample.features.values()) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut std = [0.0f64; FEATURE_COUNT];
        for sample in samples {
            for ((s, v), m) in std.iter_mut().zip(sample.features.values()).zip(mean.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt();
        }

        Self { mean, std }
    }

    /// Z-score a raw feature row. Constant columns map to 0.
    fn transform(&self, values: &[f64]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0f64; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = if self.std[i] == 0.0 {
                0.0
            } else {
                (values[i] - self.mean[i]) / self.std[i]
            };
        }
        out
    }

    /// Map standardized-space weights back to the original scale:
    /// w_j' = w_j / s_j, b' = b - sum(w_j * m_j / s_j).
    fn unscale(&self, weights: &[f64; FEATURE_COUNT], bias: f64) -> (Vec<f64>, f64) {
        let mut out_weights = vec![0.0f64; FEATURE_COUNT];
        let mut out_bias = bias;
        for i in 0..FEATURE_COUNT {
            if self.std[i] == 0.0 {
                continue;
            }
            out_weights[i] = weights[i] / self.std[i];
            out_bias -= weights[i] * self.mean[i] / self.std[i];
        }
        (out_weights, out_bias)
    }
}

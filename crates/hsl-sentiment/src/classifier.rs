//! Support-vector classifier loaded from a JSON export of the trained model.
//!
//! Two artifact shapes are accepted, selected by the `"model"` tag:
//!
//! - `svc`: kernel SVM evaluated with one-vs-one voting. Field layout follows
//!   libsvm: support vectors grouped by class, `dual_coef` with
//!   `n_classes - 1` rows, one intercept per class pair in `(0,1), (0,2), ..,
//!   (1,2), ..` order. A pair's decision value is the weighted kernel sum plus
//!   its intercept; a positive value votes for the first class of the pair.
//!   Coefficients and intercepts carry libsvm's internal sign. scikit-learn
//!   negates its public `dual_coef_` and `intercept_` for two-class models, so
//!   binary exports must take `_dual_coef_` and `_intercept_` instead.
//! - `linear`: one-vs-rest linear model; the highest scoring class wins.
//!   A single coefficient row is a binary model (positive selects `classes[1]`).
//!
//! Predictions are raw class codes. Mapping codes to sentiment labels is the
//! caller's concern.

use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::SentimentError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: i32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    fn eval(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * dist).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(degree),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[derive(Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
enum Artifact {
    Svc(SvcModel),
    Linear(LinearModel),
}

#[derive(Debug, Deserialize)]
struct SvcModel {
    classes: Vec<i64>,
    kernel: Kernel,
    support_vectors: Vec<Vec<f64>>,
    n_support: Vec<usize>,
    dual_coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    /// Index of each class's first support vector. Derived on load.
    #[serde(skip)]
    starts: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct LinearModel {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

#[derive(Debug)]
enum Model {
    Svc(SvcModel),
    Linear(LinearModel),
}

/// Pretrained classifier mapping an embedding to a class code.
///
/// Immutable after load; share it behind an `Arc`.
#[derive(Debug)]
pub struct SvmClassifier {
    model: Model,
    n_features: usize,
    fingerprint: String,
}

impl SvmClassifier {
    /// Load and validate an artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Io`] if the file cannot be read, and the
    /// errors of [`SvmClassifier::from_slice`] otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SentimentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SentimentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// Parse and validate an artifact held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Json`] for malformed JSON or an unknown
    /// `"model"` tag, and [`SentimentError::Artifact`] when array shapes are
    /// inconsistent with each other.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SentimentError> {
        let artifact: Artifact = serde_json::from_slice(bytes)?;
        let fingerprint = format!("{:x}", Sha256::digest(bytes));

        let (model, n_features) = match artifact {
            Artifact::Svc(mut svc) => {
                let n_features = validate_svc(&mut svc)?;
                (Model::Svc(svc), n_features)
            }
            Artifact::Linear(linear) => {
                let n_features = validate_linear(&linear)?;
                (Model::Linear(linear), n_features)
            }
        };

        Ok(Self {
            model,
            n_features,
            fingerprint,
        })
    }

    /// # Errors
    ///
    /// See [`SvmClassifier::from_slice`].
    pub fn from_json(json: &str) -> Result<Self, SentimentError> {
        Self::from_slice(json.as_bytes())
    }

    /// Input dimension the model was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Class codes the model can emit, in training order.
    #[must_use]
    pub fn classes(&self) -> &[i64] {
        match &self.model {
            Model::Svc(svc) => &svc.classes,
            Model::Linear(linear) => &linear.classes,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.model {
            Model::Svc(_) => "svc",
            Model::Linear(_) => "linear",
        }
    }

    /// Hex SHA-256 of the artifact bytes.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Predict the class code of one embedding.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Dimension`] if `x` does not have
    /// [`SvmClassifier::n_features`] components.
    pub fn predict(&self, x: &[f32]) -> Result<i64, SentimentError> {
        if x.len() != self.n_features {
            return Err(SentimentError::Dimension {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        let x: Vec<f64> = x.iter().copied().map(f64::from).collect();

        Ok(match &self.model {
            Model::Svc(svc) => svc.predict(&x),
            Model::Linear(linear) => linear.predict(&x),
        })
    }

    /// Predict class codes for a batch of embeddings, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first row with the wrong dimension.
    pub fn predict_batch(&self, rows: &[Vec<f32>]) -> Result<Vec<i64>, SentimentError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

impl SvcModel {
    fn predict(&self, x: &[f64]) -> i64 {
        let kvalue: Vec<f64> = self
            .support_vectors
            .iter()
            .map(|sv| self.kernel.eval(sv, x))
            .collect();

        let n = self.classes.len();
        let mut votes = vec![0_usize; n];
        let mut pair = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (si, sj) = (self.starts[i], self.starts[j]);
                let (ci, cj) = (self.n_support[i], self.n_support[j]);
                let coef_i = &self.dual_coef[j - 1];
                let coef_j = &self.dual_coef[i];

                let sum_i: f64 = (si..si + ci).map(|k| coef_i[k] * kvalue[k]).sum();
                let sum_j: f64 = (sj..sj + cj).map(|k| coef_j[k] * kvalue[k]).sum();
                let decision = sum_i + sum_j + self.intercept[pair];

                if decision > 0.0 {
                    votes[i] += 1;
                } else {
                    votes[j] += 1;
                }
                pair += 1;
            }
        }

        // First maximum wins ties.
        let mut best = 0;
        for (idx, &count) in votes.iter().enumerate().skip(1) {
            if count > votes[best] {
                best = idx;
            }
        }
        self.classes[best]
    }
}

impl LinearModel {
    fn predict(&self, x: &[f64]) -> i64 {
        if self.coef.len() == 1 {
            let score = dot(&self.coef[0], x) + self.intercept[0];
            return if score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, (row, b)) in self.coef.iter().zip(&self.intercept).enumerate() {
            let score = dot(row, x) + b;
            if score > best_score {
                best = idx;
                best_score = score;
            }
        }
        self.classes[best]
    }
}

fn artifact_err(msg: impl Into<String>) -> SentimentError {
    SentimentError::Artifact(msg.into())
}

/// Check that every row has the same non-zero length and return it.
fn uniform_width(rows: &[Vec<f64>], what: &str) -> Result<usize, SentimentError> {
    let width = rows
        .first()
        .map(Vec::len)
        .ok_or_else(|| artifact_err(format!("{what} is empty")))?;
    if width == 0 {
        return Err(artifact_err(format!("{what} rows are empty")));
    }
    if let Some(pos) = rows.iter().position(|r| r.len() != width) {
        return Err(artifact_err(format!(
            "{what} row {pos} has {} values, expected {width}",
            rows[pos].len()
        )));
    }
    Ok(width)
}

fn validate_svc(svc: &mut SvcModel) -> Result<usize, SentimentError> {
    let n_classes = svc.classes.len();
    if n_classes < 2 {
        return Err(artifact_err("svc needs at least two classes"));
    }
    if svc.n_support.len() != n_classes {
        return Err(artifact_err(format!(
            "n_support has {} entries for {n_classes} classes",
            svc.n_support.len()
        )));
    }

    let n_sv = svc.support_vectors.len();
    let total: usize = svc.n_support.iter().sum();
    if total != n_sv {
        return Err(artifact_err(format!(
            "n_support sums to {total} but there are {n_sv} support vectors"
        )));
    }
    let n_features = uniform_width(&svc.support_vectors, "support_vectors")?;

    if svc.dual_coef.len() != n_classes - 1 {
        return Err(artifact_err(format!(
            "dual_coef has {} rows, expected {}",
            svc.dual_coef.len(),
            n_classes - 1
        )));
    }
    if svc.dual_coef.iter().any(|row| row.len() != n_sv) {
        return Err(artifact_err(format!(
            "every dual_coef row must have {n_sv} values"
        )));
    }

    let n_pairs = n_classes * (n_classes - 1) / 2;
    if svc.intercept.len() != n_pairs {
        return Err(artifact_err(format!(
            "intercept has {} values, expected {n_pairs}",
            svc.intercept.len()
        )));
    }

    svc.starts = svc
        .n_support
        .iter()
        .scan(0, |acc, &count| {
            let start = *acc;
            *acc += count;
            Some(start)
        })
        .collect();

    Ok(n_features)
}

fn validate_linear(linear: &LinearModel) -> Result<usize, SentimentError> {
    let n_classes = linear.classes.len();
    if n_classes < 2 {
        return Err(artifact_err("linear model needs at least two classes"));
    }

    let rows = linear.coef.len();
    let binary = n_classes == 2 && rows == 1;
    if !binary && rows != n_classes {
        return Err(artifact_err(format!(
            "coef has {rows} rows for {n_classes} classes"
        )));
    }
    if linear.intercept.len() != rows {
        return Err(artifact_err(format!(
            "intercept has {} values for {rows} coef rows",
            linear.intercept.len()
        )));
    }

    uniform_width(&linear.coef, "coef")
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;

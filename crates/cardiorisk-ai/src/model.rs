//! Logistic-regression risk model over 13 clinical features.
//!
//! Training standardises every feature, runs full-batch gradient descent with
//! an L2 penalty, then folds the scaling back into the weights so scoring
//! works directly on raw feature values.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::dataset::{DEFAULT_SAMPLES, DEFAULT_SEED, Dataset};
use crate::error::ModelError;

pub const FEATURE_COUNT: usize = 13;

/// Feature names in model order. Request bodies are looked up by these keys.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// One patient's feature vector, ordered as [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientFeatures(pub [f64; FEATURE_COUNT]);

impl PatientFeatures {
    /// Extract features from a decoded JSON request body.
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Err(ModelError::NotAnObject),
        }
    }

    /// Look up every feature by name. Extra keys are ignored.
    ///
    /// Values may be JSON numbers or strings holding a finite number.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, ModelError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, &name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
            let raw = map.get(name).ok_or(ModelError::MissingFeature(name))?;
            *slot = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
                _ => None,
            }
            .ok_or(ModelError::NotNumeric(name))?;
        }
        Ok(Self(values))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.0[i])
    }
}

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Rows in the synthetic training set.
    pub samples: usize,
    pub seed: u64,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Inverse regularisation strength; the penalty is `1 / (c * n)`.
    pub c: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: DEFAULT_SEED,
            epochs: 500,
            learning_rate: 0.1,
            c: 1.0,
        }
    }
}

/// Fitted model with raw-space weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub trained_at: DateTime<Utc>,
    pub samples: usize,
}

impl LogisticModel {
    /// Fit on the synthetic dataset described by `cfg`.
    pub fn train(cfg: &TrainConfig) -> Result<Self, ModelError> {
        let dataset = Dataset::synthetic(cfg.samples, cfg.seed);
        Self::fit(&dataset, cfg)
    }

    /// Fit on an explicit dataset.
    pub fn fit(dataset: &Dataset, cfg: &TrainConfig) -> Result<Self, ModelError> {
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let n = dataset.len() as f64;

        // Column statistics for standardisation.
        let mut mean = [0.0; FEATURE_COUNT];
        for row in &dataset.rows {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }
        let mut std = [0.0; FEATURE_COUNT];
        for row in &dataset.rows {
            for ((s, &x), &m) in std.iter_mut().zip(row).zip(&mean) {
                *s += (x - m) * (x - m);
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        let scaled: Vec<[f64; FEATURE_COUNT]> = dataset
            .rows
            .iter()
            .map(|row| {
                let mut z = [0.0; FEATURE_COUNT];
                for j in 0..FEATURE_COUNT {
                    z[j] = (row[j] - mean[j]) / std[j];
                }
                z
            })
            .collect();

        let l2 = 1.0 / (cfg.c * n);
        let mut w = [0.0; FEATURE_COUNT];
        let mut b = 0.0;

        for _ in 0..cfg.epochs {
            let mut grad_w = [0.0; FEATURE_COUNT];
            let mut grad_b = 0.0;
            for (z, &y) in scaled.iter().zip(&dataset.targets) {
                let err = sigmoid(dot(&w, z) + b) - y;
                for (g, &x) in grad_w.iter_mut().zip(z) {
                    *g += err * x;
                }
                grad_b += err;
            }
            for (wj, g) in w.iter_mut().zip(grad_w) {
                *wj -= cfg.learning_rate * (g / n + l2 * *wj);
            }
            b -= cfg.learning_rate * grad_b / n;
        }

        // Fold standardisation into raw-space weights.
        let mut weights = Vec::with_capacity(FEATURE_COUNT);
        let mut intercept = b;
        for j in 0..FEATURE_COUNT {
            weights.push(w[j] / std[j]);
            intercept -= w[j] * mean[j] / std[j];
        }

        info!(
            samples = dataset.len(),
            epochs = cfg.epochs,
            "logistic model fitted"
        );

        Ok(Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            weights,
            intercept,
            trained_at: Utc::now(),
            samples: dataset.len(),
        })
    }

    /// Probability of class 1 (heart disease present).
    pub fn predict_proba(&self, features: &PatientFeatures) -> f64 {
        sigmoid(dot(&self.weights, &features.0) + self.intercept)
    }

    /// Probability as a percentage rounded to two decimals.
    pub fn risk_percentage(&self, features: &PatientFeatures) -> f64 {
        round2(self.predict_proba(features) * 100.0)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        if model.weights.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                found: model.weights.len(),
            });
        }
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load the model at `path`, training and saving a fresh one if absent.
    pub fn load_or_train(path: &Path, cfg: &TrainConfig) -> Result<Self, ModelError> {
        if path.exists() {
            let model = Self::load(path)?;
            info!(path = %path.display(), samples = model.samples, "model loaded");
            return Ok(model);
        }

        info!(path = %path.display(), "no model file, training a placeholder model");
        let model = Self::train(cfg)?;
        model.save(path)?;
        info!(path = %path.display(), "model trained and saved");
        Ok(model)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

//! Synthetic training data for the placeholder model.
//!
//! Each feature is drawn uniformly from its clinical range and the target is
//! an independent coin flip, so the fitted model carries no real signal. It
//! exists so the service can start without an externally trained artefact.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::FEATURE_COUNT;

pub const DEFAULT_SAMPLES: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

/// Feature rows with binary targets (`0.0` or `1.0`).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<[f64; FEATURE_COUNT]>,
    pub targets: Vec<f64>,
}

/// Summary of a dataset.
pub struct DatasetSummary {
    pub samples: usize,
    pub positives: usize,
    pub positive_rate: f64,
}

impl Dataset {
    /// Draw `size` rows from a generator seeded with `seed`.
    pub fn synthetic(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = Vec::with_capacity(size);
        let mut targets = Vec::with_capacity(size);

        for _ in 0..size {
            rows.push([
                rng.gen_range(29..77) as f64,   // age
                rng.gen_range(0..2) as f64,     // sex
                rng.gen_range(0..4) as f64,     // cp
                rng.gen_range(90..200) as f64,  // trestbps
                rng.gen_range(126..564) as f64, // chol
                rng.gen_range(0..2) as f64,     // fbs
                rng.gen_range(0..3) as f64,     // restecg
                rng.gen_range(71..=202) as f64, // thalach
                rng.gen_range(0..2) as f64,     // exang
                rng.gen_range(0.0..6.2),        // oldpeak
                rng.gen_range(0..3) as f64,     // slope
                rng.gen_range(0..4) as f64,     // ca
                rng.gen_range(1..4) as f64,     // thal
            ]);
            targets.push(rng.gen_range(0..2) as f64);
        }

        Self { rows, targets }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let positives = self.targets.iter().filter(|&&t| t >= 0.5).count();
        let positive_rate = if self.targets.is_empty() {
            0.0
        } else {
            positives as f64 / self.targets.len() as f64
        };
        DatasetSummary {
            samples: self.rows.len(),
            positives,
            positive_rate,
        }
    }
}

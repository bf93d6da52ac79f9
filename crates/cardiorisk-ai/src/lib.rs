//! Risk model layer: synthetic training data and a logistic-regression scorer.

mod dataset;
mod error;
mod model;

pub use dataset::{Dataset, DatasetSummary, DEFAULT_SAMPLES, DEFAULT_SEED};
pub use error::ModelError;
pub use model::{FEATURE_COUNT, FEATURE_NAMES, LogisticModel, PatientFeatures, TrainConfig};

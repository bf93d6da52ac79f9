use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing feature '{0}'")]
    MissingFeature(&'static str),

    #[error("feature '{0}' is not numeric")]
    NotNumeric(&'static str),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("model has {found} weights, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("model file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

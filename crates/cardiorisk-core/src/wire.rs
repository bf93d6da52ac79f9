//! JSON shapes exchanged with the `/predict` endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response body of `POST /predict`.
///
/// Success: `{"success": true, "prediction_percentage": 42.17}`.
/// Failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Why a decoded response did not yield a percentage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The server reported `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// `success: true` without a percentage.
    #[error("successful response carried no prediction_percentage")]
    Malformed,
}

impl PredictionResponse {
    pub fn ok(percentage: f64) -> Self {
        Self {
            success: true,
            prediction_percentage: Some(percentage),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            prediction_percentage: None,
            error: Some(error.into()),
        }
    }

    /// Branch on the success flag.
    pub fn outcome(&self) -> Result<f64, Outcome> {
        if self.success {
            self.prediction_percentage.ok_or(Outcome::Malformed)
        } else {
            Err(Outcome::Rejected(
                self.error.clone().unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cardiorisk_ai::ModelError;
use cardiorisk_core::PredictionResponse;
use thiserror::Error;
use tracing::warn;

/// Failures of a single `/predict` request.
///
/// Every variant is reported as `500` with a `{"success": false}` body.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "prediction failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PredictionResponse::failure(message)),
        )
            .into_response()
    }
}

//! HTTP client for the prediction service.

use async_trait::async_trait;
use cardiorisk_core::{FormPayload, PredictionResponse};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::handler::Predictor;

/// Longest body excerpt kept in a [`ClientError::Malformed`].
const BODY_EXCERPT: usize = 200;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} with an unreadable body: {body}")]
    Malformed { status: u16, body: String },
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// Client for the `/predict` endpoint.
pub struct PredictClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

impl PredictClient {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:5000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the payload and decode the response body.
    ///
    /// The body is decoded whatever the HTTP status: the service reports
    /// application failures as `500` with a `{"success": false}` body.
    pub async fn predict(&self, payload: &FormPayload) -> Result<PredictionResponse, ClientError> {
        let url = format!("{}/predict", self.base_url);

        info!(url = %url, fields = payload.len(), "requesting prediction");
        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "prediction response received");

        serde_json::from_str(&body).map_err(|_| ClientError::Malformed {
            status: status.as_u16(),
            body: excerpt(&body),
        })
    }

    /// Check that the service answers `GET /health` with `ok`.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let body = resp.text().await?;
        match serde_json::from_str::<HealthResponse>(&body) {
            Ok(h) if h.status == "ok" => Ok(()),
            _ => Err(ClientError::Malformed {
                status: status.as_u16(),
                body: excerpt(&body),
            }),
        }
    }
}

#[async_trait]
impl Predictor for PredictClient {
    async fn predict(&self, payload: &FormPayload) -> Result<PredictionResponse, ClientError> {
        PredictClient::predict(self, payload).await
    }
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

//! Prediction service: serves the logistic model behind `POST /predict`.

mod error;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cardiorisk_ai::{FEATURE_COUNT, FEATURE_NAMES, LogisticModel, PatientFeatures, TrainConfig};
use cardiorisk_core::PredictionResponse;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub use error::PredictError;

/// Shared state: the model is immutable once loaded.
#[derive(Clone)]
pub struct AppState {
    model: Arc<LogisticModel>,
}

impl AppState {
    pub fn new(model: LogisticModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }
}

/// Startup settings for [`serve`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub model_path: PathBuf,
    /// Used only when `model_path` does not exist yet.
    pub train: TrainConfig,
}

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    features: [&'static str; FEATURE_COUNT],
    endpoints: [&'static str; 3],
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load (or train) the model, bind, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let model = LogisticModel::load_or_train(&config.model_path, &config.train)
        .with_context(|| format!("preparing model at {}", config.model_path.display()))?;
    let app = router(AppState::new(model));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!("listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "cardiorisk",
        version: env!("CARGO_PKG_VERSION"),
        features: FEATURE_NAMES,
        endpoints: ["GET /", "GET /health", "POST /predict"],
    })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Score one patient.
///
/// The body is parsed as JSON whatever the request's content type.
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, PredictError> {
    let data: Value = serde_json::from_slice(&body)?;
    let features = PatientFeatures::from_json(&data)?;
    let percentage = state.model.risk_percentage(&features);

    debug!(percentage, "prediction served");
    Ok(Json(PredictionResponse::ok(percentage)))
}

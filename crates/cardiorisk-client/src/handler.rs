//! Form submission handler.
//!
//! One submission is one request: serialize the fields, await a single
//! response, then update the view. Nothing is retried. Application failures
//! (`success: false`) and transport failures both end the submission, and
//! neither ever touches the percentage readout or the chart.

use async_trait::async_trait;
use cardiorisk_core::{
    ChartDataset, FormPayload, Outcome, PredictionResponse, RiskLevel, Tone, format_percentage,
};
use tracing::{error, info, warn};

use crate::http::ClientError;
use crate::view::View;

pub const STATUS_ANALYZING: &str = "Analyzing data...";
pub const STATUS_COMPLETE: &str = "Prediction complete!";
pub const STATUS_NETWORK_ERROR: &str = "Network or Server Error.";
pub const RISK_FAILED: &str = "Prediction failed. Check the logs.";

/// Transport seam between the handler and the prediction service.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, payload: &FormPayload) -> Result<PredictionResponse, ClientError>;
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Predicted { percentage: f64, level: RiskLevel },
    /// The service answered `success: false`.
    Rejected { error: String },
    /// The request failed or the response could not be used.
    Failed { reason: String },
}

impl SubmitOutcome {
    pub fn is_predicted(&self) -> bool {
        matches!(self, Self::Predicted { .. })
    }
}

pub struct FormHandler<P> {
    predictor: P,
}

impl<P: Predictor> FormHandler<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Submit raw form entries and render the result into `view`.
    pub async fn submit<I, K, V, W>(&self, fields: I, view: &mut W) -> SubmitOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
        W: View + ?Sized,
    {
        view.set_status(STATUS_ANALYZING, Tone::Info);

        let payload = FormPayload::from_pairs(fields);

        let response = match self.predictor.predict(&payload).await {
            Ok(resp) => resp,
            Err(e) => return network_failure(view, e.to_string()),
        };

        match response.outcome() {
            Ok(percentage) => {
                let level = RiskLevel::from_percentage(percentage);

                view.set_percentage(&format_percentage(percentage));
                view.set_risk_level(level.label(), Some(level.tone()));
                view.update_chart(ChartDataset::with_percentage(percentage));
                view.set_status(STATUS_COMPLETE, Tone::Success);

                info!(percentage, level = level.label(), "prediction rendered");
                SubmitOutcome::Predicted { percentage, level }
            }
            Err(Outcome::Rejected(message)) => {
                view.set_risk_level(RISK_FAILED, None);
                view.set_status(&format!("Error: {message}"), Tone::Danger);

                warn!(error = %message, "prediction rejected by service");
                SubmitOutcome::Rejected { error: message }
            }
            Err(e @ Outcome::Malformed) => network_failure(view, e.to_string()),
        }
    }
}

fn network_failure<W: View + ?Sized>(view: &mut W, reason: String) -> SubmitOutcome {
    view.set_status(STATUS_NETWORK_ERROR, Tone::Danger);
    error!(error = %reason, "prediction request failed");
    SubmitOutcome::Failed { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Dashboard;
    use cardiorisk_core::FieldValue;
    use std::sync::Mutex;

    /// Predictor returning a fixed answer and recording what it was sent.
    struct Canned {
        answer: Option<PredictionResponse>,
        seen: Mutex<Vec<FormPayload>>,
    }

    impl Canned {
        fn respond(resp: PredictionResponse) -> Self {
            Self {
                answer: Some(resp),
                seen: Mutex::new(Vec::new()),
            }
        }

        /// Simulates a body that could not be decoded.
        fn broken() -> Self {
            Self {
                answer: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Predictor for Canned {
        async fn predict(&self, payload: &FormPayload) -> Result<PredictionResponse, ClientError> {
            self.seen.lock().unwrap().push(payload.clone());
            self.answer.clone().ok_or(ClientError::Malformed {
                status: 502,
                body: "<html>".into(),
            })
        }
    }

    const FIELDS: [(&str, &str); 3] = [("age", "54"), ("sex", "1"), ("note", "n/a")];

    async fn run(predictor: Canned) -> (SubmitOutcome, Dashboard, FormHandler<Canned>) {
        let handler = FormHandler::new(predictor);
        let mut dash = Dashboard::new();
        let outcome = handler.submit(FIELDS, &mut dash).await;
        (outcome, dash, handler)
    }

    #[tokio::test]
    async fn low_risk_example() {
        let (outcome, dash, _) = run(Canned::respond(PredictionResponse::ok(25.0))).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Predicted {
                percentage: 25.0,
                level: RiskLevel::Low
            }
        );
        assert_eq!(dash.percentage, "25%");
        assert_eq!(dash.risk_level, "Low Risk");
        assert_eq!(dash.risk_tone, Some(Tone::Success));
        assert_eq!(dash.chart.data, [25.0, 75.0]);
        assert_eq!(dash.status, STATUS_COMPLETE);
        assert_eq!(dash.status_tone, Tone::Success);
    }

    #[tokio::test]
    async fn moderate_risk_example() {
        let (_, dash, _) = run(Canned::respond(PredictionResponse::ok(45.0))).await;
        assert_eq!(dash.risk_level, "Moderate Risk");
        assert_eq!(dash.risk_tone, Some(Tone::Warning));
        assert_eq!(dash.chart.data, [45.0, 55.0]);
    }

    #[tokio::test]
    async fn high_risk_example() {
        let (_, dash, _) = run(Canned::respond(PredictionResponse::ok(80.0))).await;
        assert_eq!(dash.percentage, "80%");
        assert_eq!(dash.risk_level, "High Risk - Consult a Physician!");
        assert_eq!(dash.risk_tone, Some(Tone::Danger));
        assert_eq!(dash.chart.data, [80.0, 20.0]);
    }

    #[tokio::test]
    async fn remaining_share_matches_complement() {
        for p in [0.0, 12.34, 30.0, 59.99, 60.0, 100.0] {
            let (_, dash, _) = run(Canned::respond(PredictionResponse::ok(p))).await;
            assert_eq!(dash.chart.data, [p, 100.0 - p]);
            assert_eq!(dash.chart_updates, 1);
        }
    }

    #[tokio::test]
    async fn payload_serialized_from_fields() {
        let (_, _, handler) = run(Canned::respond(PredictionResponse::ok(10.0))).await;
        let seen = handler.predictor().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("age"), Some(&FieldValue::Number(54.0)));
        assert_eq!(seen[0].get("note"), Some(&FieldValue::Text("n/a".into())));
    }

    #[tokio::test]
    async fn rejection_only_touches_error_regions() {
        let (outcome, dash, _) =
            run(Canned::respond(PredictionResponse::failure("missing feature 'cp'"))).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                error: "missing feature 'cp'".into()
            }
        );
        assert_eq!(dash.status, "Error: missing feature 'cp'");
        assert_eq!(dash.status_tone, Tone::Danger);
        assert_eq!(dash.risk_level, RISK_FAILED);

        let untouched = Dashboard::new();
        assert_eq!(dash.percentage, untouched.percentage);
        assert_eq!(dash.chart, untouched.chart);
        assert_eq!(dash.chart_updates, 0);
    }

    #[tokio::test]
    async fn rejection_keeps_previous_prediction() {
        let mut dash = Dashboard::new();
        FormHandler::new(Canned::respond(PredictionResponse::ok(70.0)))
            .submit(FIELDS, &mut dash)
            .await;
        FormHandler::new(Canned::respond(PredictionResponse::failure("boom")))
            .submit(FIELDS, &mut dash)
            .await;

        assert_eq!(dash.percentage, "70%");
        assert_eq!(dash.chart.data, [70.0, 30.0]);
        assert_eq!(dash.chart_updates, 1);
        assert_eq!(dash.status, "Error: boom");
    }

    #[tokio::test]
    async fn transport_failure_only_sets_status() {
        let (outcome, dash, _) = run(Canned::broken()).await;
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert!(!outcome.is_predicted());
        assert_eq!(dash.status, STATUS_NETWORK_ERROR);
        assert_eq!(dash.status_tone, Tone::Danger);

        let untouched = Dashboard::new();
        assert_eq!(dash.percentage, untouched.percentage);
        assert_eq!(dash.risk_level, untouched.risk_level);
        assert_eq!(dash.chart_updates, 0);
    }

    #[tokio::test]
    async fn success_without_percentage_is_transport_failure() {
        let resp = PredictionResponse {
            success: true,
            prediction_percentage: None,
            error: None,
        };
        let (outcome, dash, _) = run(Canned::respond(resp)).await;
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(dash.status, STATUS_NETWORK_ERROR);
        assert_eq!(dash.chart_updates, 0);
    }

    /// View that records the order of region updates.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl View for Recorder {
        fn set_status(&mut self, text: &str, _tone: Tone) {
            self.0.push(format!("status:{text}"));
        }
        fn set_percentage(&mut self, text: &str) {
            self.0.push(format!("percentage:{text}"));
        }
        fn set_risk_level(&mut self, text: &str, _tone: Option<Tone>) {
            self.0.push(format!("risk:{text}"));
        }
        fn update_chart(&mut self, chart: ChartDataset) {
            self.0.push(format!("chart:{:?}", chart.data));
        }
    }

    #[tokio::test]
    async fn analyzing_status_shown_first() {
        let handler = FormHandler::new(Canned::respond(PredictionResponse::ok(25.0)));
        let mut rec = Recorder::default();
        handler.submit(FIELDS, &mut rec).await;
        assert_eq!(
            rec.0,
            [
                "status:Analyzing data...",
                "percentage:25%",
                "risk:Low Risk",
                "chart:[25.0, 75.0]",
                "status:Prediction complete!",
            ]
        );
    }
}

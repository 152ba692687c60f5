use crate::domain::models::JournalAssessment;
use crate::domain::questionnaire::ScoreResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("predictor unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("predictor returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("predictor response malformed: {0}")]
    Malformed(String),
}

/// The external prediction service.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Two-level (`High`/`Low`) stress, anxiety and depression for a journal text.
    async fn assess_journal(&self, content: &str) -> Result<JournalAssessment, PredictorError>;

    /// Prediction for locally computed questionnaire levels.
    async fn predict_scores(&self, scores: &ScoreResult) -> Result<serde_json::Value, PredictorError>;

    /// Model output for a raw answer document, returned as the service sent it.
    async fn predict_answers(
        &self,
        answers: &serde_json::Value,
    ) -> Result<serde_json::Value, PredictorError>;
}

/// Answer fields the model is trained on.
pub const MODEL_FEATURES: [&str; 12] = [
    "mood",
    "sleep",
    "energy",
    "appetite",
    "interest",
    "irritability",
    "concentration",
    "feelingWorthy",
    "anxiousThoughts",
    "panicAttacks",
    "stress",
    "anxiety",
];

/// Keeps only the model's feature fields. Absent fields stay absent.
pub fn model_features(answers: &serde_json::Value) -> serde_json::Value {
    let features = MODEL_FEATURES
        .iter()
        .filter_map(|name| answers.get(*name).map(|v| (name.to_string(), v.clone())))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(features)
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PredictionEnvelope {
    prediction: Option<serde_json::Value>,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictorError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<reqwest::Response, PredictorError> {
        let url = self.endpoint(path);
        tracing::debug!("Calling predictor at {}", url);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("Predictor at {} answered {}", url, status);
            return Err(PredictorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn post_for_prediction(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, PredictorError> {
        let envelope: PredictionEnvelope = self
            .post(path, body)
            .await?
            .json()
            .await
            .map_err(|e| PredictorError::Malformed(e.to_string()))?;
        envelope
            .prediction
            .ok_or_else(|| PredictorError::Malformed("missing `prediction` field".to_string()))
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn assess_journal(&self, content: &str) -> Result<JournalAssessment, PredictorError> {
        self.post("journal", &json!({ "content": content }))
            .await?
            .json::<JournalAssessment>()
            .await
            .map_err(|e| PredictorError::Malformed(e.to_string()))
    }

    async fn predict_scores(&self, scores: &ScoreResult) -> Result<serde_json::Value, PredictorError> {
        self.post_for_prediction("predict", &json!({ "scores": scores }))
            .await
    }

    async fn predict_answers(
        &self,
        answers: &serde_json::Value,
    ) -> Result<serde_json::Value, PredictorError> {
        self.post("predict", &model_features(answers))
            .await?
            .json()
            .await
            .map_err(|e| PredictorError::Malformed(e.to_string()))
    }
}

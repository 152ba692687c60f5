use crate::db::MemoryEntryStore;
use crate::domain::models::JournalAssessment;
use crate::domain::questionnaire::{ScoreResult, ScoringConfig, SeverityLevel};
use crate::services::predictor::{Predictor, PredictorError};
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Predictor double with canned answers.
pub struct StubPredictor {
    pub assessment: JournalAssessment,
    pub prediction: serde_json::Value,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl Default for StubPredictor {
    fn default() -> Self {
        Self {
            assessment: JournalAssessment {
                stress: SeverityLevel::Low,
                anxiety: SeverityLevel::Low,
                depression: SeverityLevel::Low,
            },
            prediction: json!(["Low", "Low", "Low"]),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl StubPredictor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn answer<T>(&self, value: T) -> Result<T, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PredictorError::Status {
                status: 503,
                body: "model not loaded".to_string(),
            });
        }
        Ok(value)
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn assess_journal(&self, _content: &str) -> Result<JournalAssessment, PredictorError> {
        self.answer(self.assessment)
    }

    async fn predict_scores(&self, _scores: &ScoreResult) -> Result<serde_json::Value, PredictorError> {
        self.answer(self.prediction.clone())
    }

    async fn predict_answers(
        &self,
        _answers: &serde_json::Value,
    ) -> Result<serde_json::Value, PredictorError> {
        self.answer(self.prediction.clone())
    }
}

pub fn app(predictor: StubPredictor) -> (Router, MemoryEntryStore, Arc<StubPredictor>) {
    let store = MemoryEntryStore::new();
    let predictor = Arc::new(predictor);
    let state = Arc::new(AppState {
        store: Arc::new(store.clone()),
        predictor: predictor.clone(),
        scoring: ScoringConfig::default(),
    });
    (super::routes(state), store, predictor)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

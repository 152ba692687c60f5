use crate::services::predictor::PredictorError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("prediction failed: {0}")]
    Predictor(#[from] PredictorError),
    #[error("entry store failed: {0}")]
    Store(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Predictor(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Store(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Predictor(_) | AppError::Store(_) => {
                tracing::error!("Request failed: {}", self);
                "Internal server error".to_string()
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

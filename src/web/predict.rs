use crate::error::AppError;
use crate::state::SharedState;
use crate::web::questionnaire::require_answers;
use axum::{extract::State, Json};

/// Forwards the model's answer fields to the predictor without scoring them locally
/// and returns the predictor's body unchanged.
pub async fn predict_ml(
    State(state): State<SharedState>,
    payload: Option<Json<serde_json::Value>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let answers = require_answers(payload)?;
    tracing::debug!(
        "Forwarding answers with {} fields to predictor",
        answers.as_object().map_or(0, |o| o.len())
    );
    let body = state.predictor.predict_answers(&answers).await?;
    Ok(Json(body))
}

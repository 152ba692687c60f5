use crate::domain::advice::{final_recommendation, AdviceBundle, AdviceTable, Recommendation};
use crate::domain::models::{NewQuestionnaireResult, QuestionnaireResult, ResultSummary};
use crate::domain::questionnaire::{score_questionnaire, QuestionnaireAnswers, ScoreResult};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct RecommendationView {
    kind: Recommendation,
    message: &'static str,
}

impl From<Recommendation> for RecommendationView {
    fn from(kind: Recommendation) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    message: &'static str,
    id: Uuid,
    prediction: serde_json::Value,
    levels: ScoreResult,
    solutions: AdviceBundle,
    recommendation: RecommendationView,
}

#[derive(Debug, Deserialize)]
struct ResultsQuery {
    user_id: Option<Uuid>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/results", get(list_results))
        .with_state(state)
}

/// Returns the body when it is a JSON object.
pub(crate) fn require_answers(
    payload: Option<Json<serde_json::Value>>,
) -> Result<serde_json::Value, AppError> {
    match payload {
        Some(Json(document)) if document.is_object() => Ok(document),
        _ => Err(AppError::Validation("Missing answers".to_string())),
    }
}

fn owner_of(document: &serde_json::Value) -> Option<Uuid> {
    document
        .get("userId")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
}

async fn submit(
    State(state): State<SharedState>,
    payload: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let document = require_answers(payload)?;

    let answers = QuestionnaireAnswers::from_document(&document);
    let scores = score_questionnaire(&answers, &state.scoring);
    let solutions = AdviceBundle::for_scores(AdviceTable::Questionnaire, &scores);
    let recommendation = final_recommendation(scores.stress, scores.anxiety, scores.depression);

    let saved = state
        .store
        .insert_questionnaire_result(NewQuestionnaireResult {
            user_id: owner_of(&document),
            answers: document,
            scores,
            result: ResultSummary::from(&scores),
            solutions: solutions.clone(),
        })
        .await?;
    tracing::info!(
        "Questionnaire result {} saved (stress: {}, anxiety: {}, depression: {})",
        saved.id,
        scores.stress,
        scores.anxiety,
        scores.depression
    );

    let prediction = state.predictor.predict_scores(&scores).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Result saved and prediction received",
            id: saved.id,
            prediction,
            levels: scores,
            solutions,
            recommendation: recommendation.into(),
        }),
    ))
}

async fn list_results(
    State(state): State<SharedState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<QuestionnaireResult>>, AppError> {
    let results = state.store.list_questionnaire_results(query.user_id).await?;
    Ok(Json(results))
}

use crate::domain::models::{JournalAnalysis, JournalEntry};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct JournalPayload {
    entry: Option<String>,
}

#[derive(Debug, Serialize)]
struct JournalEntryResponse {
    message: &'static str,
    entry: JournalEntry,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/:id", axum::routing::delete(delete_entry))
        .route("/edit/:id", put(edit_entry))
        .with_state(state)
}

fn require_entry(payload: Option<Json<JournalPayload>>) -> Result<String, AppError> {
    payload
        .and_then(|Json(p)| p.entry)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Journal entry is required.".to_string()))
}

/// Unparseable ids cannot name a stored entry, so they read as not found.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn not_found() -> AppError {
    AppError::NotFound("Journal entry not found.".to_string())
}

async fn analyze(state: &SharedState, text: String) -> Result<JournalAnalysis, AppError> {
    let assessment = state.predictor.assess_journal(&text).await?;
    Ok(JournalAnalysis::new(text, assessment))
}

async fn create_entry(
    State(state): State<SharedState>,
    payload: Option<Json<JournalPayload>>,
) -> Result<Json<JournalEntryResponse>, AppError> {
    let text = require_entry(payload)?;
    let analysis = analyze(&state, text).await?;
    let entry = state.store.insert_journal_entry(analysis).await?;
    tracing::info!("Journal entry {} saved (mood: {})", entry.id, entry.mood.as_str());

    Ok(Json(JournalEntryResponse {
        message: "Journal entry saved successfully!",
        entry,
    }))
}

async fn list_entries(State(state): State<SharedState>) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let entries = state.store.list_journal_entries().await?;
    Ok(Json(entries))
}

async fn edit_entry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Option<Json<JournalPayload>>,
) -> Result<Json<JournalEntryResponse>, AppError> {
    let id = parse_id(&id)?;
    let text = require_entry(payload)?;

    if state.store.find_journal_entry(id).await?.is_none() {
        return Err(not_found());
    }

    let analysis = analyze(&state, text).await?;
    let entry = state
        .store
        .update_journal_entry(id, analysis)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!("Journal entry {} updated (mood: {})", entry.id, entry.mood.as_str());

    Ok(Json(JournalEntryResponse {
        message: "Journal entry updated successfully!",
        entry,
    }))
}

async fn delete_entry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    if !state.store.delete_journal_entry(id).await? {
        return Err(not_found());
    }
    tracing::info!("Journal entry {} deleted", id);

    Ok(Json(MessageResponse {
        message: "Journal entry deleted.",
    }))
}

use super::EntryStore;
use crate::domain::advice::AdviceBundle;
use crate::domain::models::{
    JournalAnalysis, JournalEntry, NewQuestionnaireResult, QuestionnaireResult, ResultSummary,
};
use crate::domain::mood::MoodCategory;
use crate::domain::questionnaire::{ScoreResult, SeverityLevel};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct JournalEntryRow {
    id: Uuid,
    entry: String,
    mood: MoodCategory,
    stress: SeverityLevel,
    anxiety: SeverityLevel,
    depression: SeverityLevel,
    stress_solution: String,
    anxiety_solution: String,
    depression_solution: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<JournalEntryRow> for JournalEntry {
    fn from(row: JournalEntryRow) -> Self {
        Self {
            id: row.id,
            entry: row.entry,
            mood: row.mood,
            stress: row.stress,
            anxiety: row.anxiety,
            depression: row.depression,
            solutions: AdviceBundle {
                stress_solution: row.stress_solution,
                anxiety_solution: row.anxiety_solution,
                depression_solution: row.depression_solution,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct QuestionnaireResultRow {
    id: Uuid,
    user_id: Option<Uuid>,
    answers: serde_json::Value,
    stress_level: SeverityLevel,
    anxiety_level: SeverityLevel,
    depression_level: SeverityLevel,
    result: Json<ResultSummary>,
    solutions: Json<AdviceBundle>,
    created_at: DateTime<Utc>,
}

impl From<QuestionnaireResultRow> for QuestionnaireResult {
    fn from(row: QuestionnaireResultRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            answers: row.answers,
            scores: ScoreResult {
                stress: row.stress_level,
                anxiety: row.anxiety_level,
                depression: row.depression_level,
            },
            result: row.result.0,
            solutions: row.solutions.0,
            created_at: row.created_at,
        }
    }
}

const JOURNAL_COLUMNS: &str = r#"
    id,
    entry,
    mood,
    stress,
    anxiety,
    depression,
    stress_solution,
    anxiety_solution,
    depression_solution,
    created_at,
    updated_at
"#;

const RESULT_COLUMNS: &str = r#"
    id,
    user_id,
    answers,
    stress_level,
    anxiety_level,
    depression_level,
    result,
    solutions,
    created_at
"#;

pub async fn insert_journal_entry(pool: &PgPool, analysis: &JournalAnalysis) -> Result<JournalEntry> {
    let row = sqlx::query_as::<_, JournalEntryRow>(&format!(
        r#"
        INSERT INTO journal_entries (
            id, entry, mood, stress, anxiety, depression,
            stress_solution, anxiety_solution, depression_solution
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {JOURNAL_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&analysis.entry)
    .bind(analysis.mood)
    .bind(analysis.levels.stress)
    .bind(analysis.levels.anxiety)
    .bind(analysis.levels.depression)
    .bind(&analysis.solutions.stress_solution)
    .bind(&analysis.solutions.anxiety_solution)
    .bind(&analysis.solutions.depression_solution)
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

pub async fn list_journal_entries(pool: &PgPool) -> Result<Vec<JournalEntry>> {
    let rows = sqlx::query_as::<_, JournalEntryRow>(&format!(
        r#"
        SELECT {JOURNAL_COLUMNS}
        FROM journal_entries
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(JournalEntry::from).collect())
}

pub async fn find_journal_entry(pool: &PgPool, id: Uuid) -> Result<Option<JournalEntry>> {
    let row = sqlx::query_as::<_, JournalEntryRow>(&format!(
        r#"
        SELECT {JOURNAL_COLUMNS}
        FROM journal_entries
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(JournalEntry::from))
}

pub async fn update_journal_entry(
    pool: &PgPool,
    id: Uuid,
    analysis: &JournalAnalysis,
) -> Result<Option<JournalEntry>> {
    let row = sqlx::query_as::<_, JournalEntryRow>(&format!(
        r#"
        UPDATE journal_entries
        SET entry = $2,
            mood = $3,
            stress = $4,
            anxiety = $5,
            depression = $6,
            stress_solution = $7,
            anxiety_solution = $8,
            depression_solution = $9,
            updated_at = now()
        WHERE id = $1
        RETURNING {JOURNAL_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&analysis.entry)
    .bind(analysis.mood)
    .bind(analysis.levels.stress)
    .bind(analysis.levels.anxiety)
    .bind(analysis.levels.depression)
    .bind(&analysis.solutions.stress_solution)
    .bind(&analysis.solutions.anxiety_solution)
    .bind(&analysis.solutions.depression_solution)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(JournalEntry::from))
}

pub async fn delete_journal_entry(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_questionnaire_result(
    pool: &PgPool,
    new: &NewQuestionnaireResult,
) -> Result<QuestionnaireResult> {
    let row = sqlx::query_as::<_, QuestionnaireResultRow>(&format!(
        r#"
        INSERT INTO questionnaire_results (
            id, user_id, answers, stress_level, anxiety_level, depression_level, result, solutions
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {RESULT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.answers)
    .bind(new.scores.stress)
    .bind(new.scores.anxiety)
    .bind(new.scores.depression)
    .bind(Json(&new.result))
    .bind(Json(&new.solutions))
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

pub async fn list_questionnaire_results(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<QuestionnaireResult>> {
    let rows = sqlx::query_as::<_, QuestionnaireResultRow>(&format!(
        r#"
        SELECT {RESULT_COLUMNS}
        FROM questionnaire_results
        WHERE ($1::uuid IS NULL OR user_id = $1)
        ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(QuestionnaireResult::from).collect())
}

#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn insert_journal_entry(&self, analysis: JournalAnalysis) -> Result<JournalEntry> {
        insert_journal_entry(&self.pool, &analysis).await
    }

    async fn list_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        list_journal_entries(&self.pool).await
    }

    async fn find_journal_entry(&self, id: Uuid) -> Result<Option<JournalEntry>> {
        find_journal_entry(&self.pool, id).await
    }

    async fn update_journal_entry(
        &self,
        id: Uuid,
        analysis: JournalAnalysis,
    ) -> Result<Option<JournalEntry>> {
        update_journal_entry(&self.pool, id, &analysis).await
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<bool> {
        delete_journal_entry(&self.pool, id).await
    }

    async fn insert_questionnaire_result(
        &self,
        result: NewQuestionnaireResult,
    ) -> Result<QuestionnaireResult> {
        insert_questionnaire_result(&self.pool, &result).await
    }

    async fn list_questionnaire_results(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<QuestionnaireResult>> {
        list_questionnaire_results(&self.pool, user_id).await
    }
}

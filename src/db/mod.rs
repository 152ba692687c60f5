pub mod memory;
pub mod postgres;

use crate::domain::models::{JournalAnalysis, JournalEntry, NewQuestionnaireResult, QuestionnaireResult};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryEntryStore;
pub use postgres::PgEntryStore;

/// Persistence for journal entries and questionnaire results.
///
/// Listing operations return records newest first.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert_journal_entry(&self, analysis: JournalAnalysis) -> Result<JournalEntry>;

    async fn list_journal_entries(&self) -> Result<Vec<JournalEntry>>;

    async fn find_journal_entry(&self, id: Uuid) -> Result<Option<JournalEntry>>;

    /// Returns `None` when no entry has the id.
    async fn update_journal_entry(
        &self,
        id: Uuid,
        analysis: JournalAnalysis,
    ) -> Result<Option<JournalEntry>>;

    /// Returns `false` when no entry has the id.
    async fn delete_journal_entry(&self, id: Uuid) -> Result<bool>;

    async fn insert_questionnaire_result(
        &self,
        result: NewQuestionnaireResult,
    ) -> Result<QuestionnaireResult>;

    async fn list_questionnaire_results(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<QuestionnaireResult>>;
}

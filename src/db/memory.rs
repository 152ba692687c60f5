use super::EntryStore;
use crate::domain::models::{JournalAnalysis, JournalEntry, NewQuestionnaireResult, QuestionnaireResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store. Records are kept in insertion order, which is also
/// creation order.
#[derive(Clone, Default)]
pub struct MemoryEntryStore {
    journal: Arc<RwLock<Vec<JournalEntry>>>,
    results: Arc<RwLock<Vec<QuestionnaireResult>>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn insert_journal_entry(&self, analysis: JournalAnalysis) -> Result<JournalEntry> {
        let entry = JournalEntry::from_analysis(Uuid::new_v4(), analysis, Utc::now());
        self.journal.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        let journal = self.journal.read().await;
        Ok(journal.iter().rev().cloned().collect())
    }

    async fn find_journal_entry(&self, id: Uuid) -> Result<Option<JournalEntry>> {
        let journal = self.journal.read().await;
        Ok(journal.iter().find(|e| e.id == id).cloned())
    }

    async fn update_journal_entry(
        &self,
        id: Uuid,
        analysis: JournalAnalysis,
    ) -> Result<Option<JournalEntry>> {
        let mut journal = self.journal.write().await;
        let Some(entry) = journal.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entry.apply(analysis, Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<bool> {
        let mut journal = self.journal.write().await;
        let before = journal.len();
        journal.retain(|e| e.id != id);
        Ok(journal.len() != before)
    }

    async fn insert_questionnaire_result(
        &self,
        result: NewQuestionnaireResult,
    ) -> Result<QuestionnaireResult> {
        let stored = QuestionnaireResult::from_new(Uuid::new_v4(), result, Utc::now());
        self.results.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_questionnaire_results(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<QuestionnaireResult>> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .rev()
            .filter(|r| user_id.is_none() || r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advice::{AdviceBundle, AdviceTable};
    use crate::domain::models::{JournalAssessment, ResultSummary};
    use crate::domain::mood::MoodCategory;
    use crate::domain::questionnaire::{ScoreResult, SeverityLevel};

    fn analysis(text: &str, stress: SeverityLevel) -> JournalAnalysis {
        JournalAnalysis::new(
            text.to_string(),
            JournalAssessment {
                stress,
                anxiety: SeverityLevel::Low,
                depression: SeverityLevel::Low,
            },
        )
    }

    fn new_result(user_id: Option<Uuid>) -> NewQuestionnaireResult {
        let scores = ScoreResult {
            stress: SeverityLevel::Low,
            anxiety: SeverityLevel::Moderate,
            depression: SeverityLevel::High,
        };
        NewQuestionnaireResult {
            user_id,
            answers: serde_json::json!({ "mood": "Low" }),
            result: ResultSummary::from(&scores),
            solutions: AdviceBundle::for_scores(AdviceTable::Questionnaire, &scores),
            scores,
        }
    }

    #[tokio::test]
    async fn test_journal_lifecycle() {
        let store = MemoryEntryStore::new();

        let first = store
            .insert_journal_entry(analysis("happy morning", SeverityLevel::Low))
            .await
            .unwrap();
        let second = store
            .insert_journal_entry(analysis("quiet evening", SeverityLevel::Low))
            .await
            .unwrap();

        let listed = store.list_journal_entries().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        let updated = store
            .update_journal_entry(first.id, analysis("sad afternoon", SeverityLevel::High))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.mood, MoodCategory::Sad);
        assert_eq!(updated.stress, SeverityLevel::High);
        assert_eq!(updated.created_at, first.created_at);

        let found = store.find_journal_entry(first.id).await.unwrap().unwrap();
        assert_eq!(found, updated);

        assert!(store.delete_journal_entry(first.id).await.unwrap());
        assert!(!store.delete_journal_entry(first.id).await.unwrap());
        assert!(store.find_journal_entry(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryEntryStore::new();
        let outcome = store
            .update_journal_entry(Uuid::new_v4(), analysis("anything", SeverityLevel::Low))
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_results_filter_by_user() {
        let store = MemoryEntryStore::new();
        let user = Uuid::new_v4();

        store.insert_questionnaire_result(new_result(None)).await.unwrap();
        let owned = store
            .insert_questionnaire_result(new_result(Some(user)))
            .await
            .unwrap();

        let all = store.list_questionnaire_results(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, owned.id);

        let mine = store.list_questionnaire_results(Some(user)).await.unwrap();
        assert_eq!(mine, vec![owned]);
    }
}

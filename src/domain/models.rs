use crate::domain::advice::{AdviceBundle, AdviceTable};
use crate::domain::mood::{predict_mood_from_text, MoodCategory};
use crate::domain::questionnaire::{ScoreResult, SeverityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Levels returned by the predictor for a journal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalAssessment {
    pub stress: SeverityLevel,
    pub anxiety: SeverityLevel,
    pub depression: SeverityLevel,
}

impl From<JournalAssessment> for ScoreResult {
    fn from(value: JournalAssessment) -> Self {
        Self {
            stress: value.stress,
            anxiety: value.anxiety,
            depression: value.depression,
        }
    }
}

/// Everything derived from a journal text. Recomputed in full on every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalAnalysis {
    pub entry: String,
    pub mood: MoodCategory,
    pub levels: ScoreResult,
    pub solutions: AdviceBundle,
}

impl JournalAnalysis {
    pub fn new(entry: String, assessment: JournalAssessment) -> Self {
        let levels = ScoreResult::from(assessment);
        Self {
            mood: predict_mood_from_text(&entry),
            solutions: AdviceBundle::for_scores(AdviceTable::Journal, &levels),
            entry,
            levels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub entry: String,
    pub mood: MoodCategory,
    pub stress: SeverityLevel,
    pub anxiety: SeverityLevel,
    pub depression: SeverityLevel,
    #[serde(flatten)]
    pub solutions: AdviceBundle,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn from_analysis(id: Uuid, analysis: JournalAnalysis, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            entry: analysis.entry,
            mood: analysis.mood,
            stress: analysis.levels.stress,
            anxiety: analysis.levels.anxiety,
            depression: analysis.levels.depression,
            solutions: analysis.solutions,
            created_at,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, analysis: JournalAnalysis, updated_at: DateTime<Utc>) {
        self.entry = analysis.entry;
        self.mood = analysis.mood;
        self.stress = analysis.levels.stress;
        self.anxiety = analysis.levels.anxiety;
        self.depression = analysis.levels.depression;
        self.solutions = analysis.solutions;
        self.updated_at = Some(updated_at);
    }
}

/// Human-readable level strings stored alongside the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub stress_level: String,
    pub anxiety_level: String,
    pub depression_level: String,
}

impl From<&ScoreResult> for ResultSummary {
    fn from(scores: &ScoreResult) -> Self {
        Self {
            stress_level: scores.stress.to_string(),
            anxiety_level: scores.anxiety.to_string(),
            depression_level: scores.depression.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewQuestionnaireResult {
    pub user_id: Option<Uuid>,
    pub answers: serde_json::Value,
    pub scores: ScoreResult,
    pub result: ResultSummary,
    pub solutions: AdviceBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResult {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub answers: serde_json::Value,
    pub scores: ScoreResult,
    pub result: ResultSummary,
    pub solutions: AdviceBundle,
    pub created_at: DateTime<Utc>,
}

impl QuestionnaireResult {
    pub fn from_new(id: Uuid, new: NewQuestionnaireResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            answers: new.answers,
            scores: new.scores,
            result: new.result,
            solutions: new.solutions,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SeverityLevel::*;

    #[test]
    fn test_journal_analysis_derives_everything() {
        let analysis = JournalAnalysis::new(
            "So excited about the trip".to_string(),
            JournalAssessment {
                stress: High,
                anxiety: Low,
                depression: Low,
            },
        );
        assert_eq!(analysis.mood, MoodCategory::Happy);
        assert_eq!(analysis.levels.stress, High);
        assert!(analysis.solutions.stress_solution.contains("high stress"));
    }

    #[test]
    fn test_apply_replaces_derived_fields() {
        let created = Utc::now();
        let first = JournalAnalysis::new(
            "happy day".to_string(),
            JournalAssessment {
                stress: Low,
                anxiety: Low,
                depression: Low,
            },
        );
        let mut entry = JournalEntry::from_analysis(Uuid::new_v4(), first, created);

        let second = JournalAnalysis::new(
            "worried all night".to_string(),
            JournalAssessment {
                stress: High,
                anxiety: High,
                depression: Low,
            },
        );
        entry.apply(second.clone(), created);

        assert_eq!(entry.entry, "worried all night");
        assert_eq!(entry.mood, MoodCategory::Anxious);
        assert_eq!(entry.anxiety, High);
        assert_eq!(entry.solutions, second.solutions);
        assert_eq!(entry.created_at, created);
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn test_result_summary() {
        let summary = ResultSummary::from(&ScoreResult {
            stress: Moderate,
            anxiety: Low,
            depression: High,
        });
        assert_eq!(summary.stress_level, "Moderate");
        assert_eq!(summary.depression_level, "High");
    }

    #[test]
    fn test_journal_entry_wire_shape() {
        let entry = JournalEntry::from_analysis(
            Uuid::new_v4(),
            JournalAnalysis::new(
                "fine".to_string(),
                JournalAssessment {
                    stress: Low,
                    anxiety: Low,
                    depression: Low,
                },
            ),
            Utc::now(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mood"], "Neutral");
        assert_eq!(json["stress"], "Low");
        assert!(json.get("depressionSolution").is_some());
        assert!(json.get("createdAt").is_some());
    }
}

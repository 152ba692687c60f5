use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mood_category")]
pub enum MoodCategory {
    Happy,
    Sad,
    Anxious,
    Neutral,
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "Happy",
            MoodCategory::Sad => "Sad",
            MoodCategory::Anxious => "Anxious",
            MoodCategory::Neutral => "Neutral",
        }
    }
}

/// Keyword sets in priority order. The first set with a hit decides the mood.
static MOOD_KEYWORDS: [(MoodCategory, &[&str]); 3] = [
    (MoodCategory::Happy, &["happy", "joy", "excited"]),
    (MoodCategory::Sad, &["sad", "depressed", "down"]),
    (MoodCategory::Anxious, &["anxious", "worried", "stressed"]),
];

/// Case-insensitive substring scan over the keyword sets.
pub fn predict_mood_from_text(text: &str) -> MoodCategory {
    let lowered = text.to_lowercase();
    MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(mood, _)| *mood)
        .unwrap_or(MoodCategory::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_wins_over_sad() {
        assert_eq!(
            predict_mood_from_text("I feel SAD but also happy"),
            MoodCategory::Happy
        );
    }

    #[test]
    fn test_each_category() {
        assert_eq!(predict_mood_from_text("Pure JOY today"), MoodCategory::Happy);
        assert_eq!(predict_mood_from_text("Feeling a bit down"), MoodCategory::Sad);
        assert_eq!(
            predict_mood_from_text("Worried about the exam and stressed"),
            MoodCategory::Anxious
        );
        assert_eq!(
            predict_mood_from_text("sad and anxious at once"),
            MoodCategory::Sad
        );
    }

    #[test]
    fn test_no_keywords_is_neutral() {
        assert_eq!(predict_mood_from_text("nothing much happened"), MoodCategory::Neutral);
        assert_eq!(predict_mood_from_text(""), MoodCategory::Neutral);
    }

    #[test]
    fn test_substring_match() {
        // "downtown" contains "down"
        assert_eq!(predict_mood_from_text("Walked downtown"), MoodCategory::Sad);
    }
}

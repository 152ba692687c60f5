use crate::domain::advice::AdviceDomain;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single answer option parsed from its wire label.
///
/// Parsing never fails: anything that is not one of the known labels becomes the
/// `Unknown` variant, which scores zero.
pub trait AnswerChoice: Sized + Default {
    fn from_label(label: &str) -> Self;
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: AnswerChoice,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(label)) => T::from_label(label.trim()),
        _ => T::default(),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mood {
    VeryLow,
    Low,
    Neutral,
    High,
    VeryHigh,
    #[default]
    Unknown,
}

impl AnswerChoice for Mood {
    fn from_label(label: &str) -> Self {
        match label {
            "Very Low" => Self::VeryLow,
            "Low" => Self::Low,
            "Neutral" => Self::Neutral,
            "High" => Self::High,
            "Very High" => Self::VeryHigh,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SleepQuality {
    VeryPoor,
    Poor,
    Neutral,
    Good,
    VeryGood,
    #[default]
    Unknown,
}

impl AnswerChoice for SleepQuality {
    fn from_label(label: &str) -> Self {
        match label {
            "Very Poor" => Self::VeryPoor,
            "Poor" => Self::Poor,
            "Neutral" => Self::Neutral,
            "Good" => Self::Good,
            "Very Good" => Self::VeryGood,
            _ => Self::Unknown,
        }
    }
}

/// How often something happens. Used by `anxiousThoughts` and by the frequency
/// variants of `panicAttacks` and `feelingWorthy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Frequency {
    VeryOften,
    Sometimes,
    Rarely,
    Never,
    #[default]
    Unknown,
}

impl AnswerChoice for Frequency {
    fn from_label(label: &str) -> Self {
        match label {
            "Very Often" => Self::VeryOften,
            "Sometimes" => Self::Sometimes,
            "Rarely" => Self::Rarely,
            "Never" => Self::Never,
            _ => Self::Unknown,
        }
    }
}

/// `Yes` / `No` / `Uncertain` answers, used by the binary variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
    Uncertain,
    #[default]
    Unknown,
}

impl AnswerChoice for YesNo {
    fn from_label(label: &str) -> Self {
        match label {
            "Yes" => Self::Yes,
            "No" => Self::No,
            "Uncertain" => Self::Uncertain,
            _ => Self::Unknown,
        }
    }
}

/// Loss of interest in usual activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterestLoss {
    Completely,
    Somewhat,
    No,
    #[default]
    Unknown,
}

impl AnswerChoice for InterestLoss {
    fn from_label(label: &str) -> Self {
        match label {
            "Yes, Completely" => Self::Completely,
            "Somewhat" => Self::Somewhat,
            "No" => Self::No,
            _ => Self::Unknown,
        }
    }
}

/// A question whose options differ between schema variants. Both readings are kept
/// so the scale can be picked at scoring time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualScaleAnswer {
    pub frequency: Frequency,
    pub binary: YesNo,
}

impl AnswerChoice for DualScaleAnswer {
    fn from_label(label: &str) -> Self {
        Self {
            frequency: Frequency::from_label(label),
            binary: YesNo::from_label(label),
        }
    }
}

/// Which option set a dual-scale question is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerScale {
    Binary,
    Frequency,
}

impl AnswerScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerScale::Binary => "binary",
            AnswerScale::Frequency => "frequency",
        }
    }
}

impl TryFrom<&str> for AnswerScale {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "binary" | "yes_no" | "yesno" => Ok(AnswerScale::Binary),
            "frequency" | "freq" => Ok(AnswerScale::Frequency),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub panic_attacks: AnswerScale,
    pub feeling_worthy: AnswerScale,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            panic_attacks: AnswerScale::Binary,
            feeling_worthy: AnswerScale::Frequency,
        }
    }
}

/// The scored subset of a questionnaire submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    #[serde(default, deserialize_with = "lenient")]
    pub mood: Mood,
    #[serde(default, deserialize_with = "lenient")]
    pub sleep: SleepQuality,
    #[serde(default, deserialize_with = "lenient")]
    pub anxious_thoughts: Frequency,
    #[serde(default, deserialize_with = "lenient")]
    pub panic_attacks: DualScaleAnswer,
    #[serde(default, deserialize_with = "lenient")]
    pub interest: InterestLoss,
    #[serde(default, deserialize_with = "lenient")]
    pub feeling_worthy: DualScaleAnswer,
}

impl QuestionnaireAnswers {
    /// Reads the scored questions out of a raw answer document. Keys that are
    /// missing or hold unexpected values read as `Unknown`.
    pub fn from_document(document: &serde_json::Value) -> Self {
        Self::deserialize(document).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "severity_level")]
pub enum SeverityLevel {
    Low,
    #[serde(alias = "Medium")]
    Moderate,
    High,
}

impl SeverityLevel {
    /// Buckets a sub-score: above 5 is high, above 2 is moderate.
    pub fn from_sub_score(score: u8) -> Self {
        if score > 5 {
            SeverityLevel::High
        } else if score > 2 {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::High => "High",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubScores {
    pub stress: u8,
    pub anxiety: u8,
    pub depression: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub stress: SeverityLevel,
    pub anxiety: SeverityLevel,
    pub depression: SeverityLevel,
}

impl ScoreResult {
    pub fn level(&self, domain: AdviceDomain) -> SeverityLevel {
        match domain {
            AdviceDomain::Stress => self.stress,
            AdviceDomain::Anxiety => self.anxiety,
            AdviceDomain::Depression => self.depression,
        }
    }
}

impl From<SubScores> for ScoreResult {
    fn from(scores: SubScores) -> Self {
        Self {
            stress: SeverityLevel::from_sub_score(scores.stress),
            anxiety: SeverityLevel::from_sub_score(scores.anxiety),
            depression: SeverityLevel::from_sub_score(scores.depression),
        }
    }
}

fn mood_points(mood: Mood) -> u8 {
    match mood {
        Mood::VeryLow => 3,
        Mood::Low => 2,
        Mood::Neutral => 1,
        Mood::High | Mood::VeryHigh | Mood::Unknown => 0,
    }
}

fn sleep_points(sleep: SleepQuality) -> u8 {
    match sleep {
        SleepQuality::VeryPoor => 3,
        SleepQuality::Poor => 2,
        SleepQuality::Neutral => 1,
        SleepQuality::Good | SleepQuality::VeryGood | SleepQuality::Unknown => 0,
    }
}

fn anxious_thoughts_points(frequency: Frequency) -> u8 {
    match frequency {
        Frequency::VeryOften => 3,
        Frequency::Sometimes => 2,
        Frequency::Rarely => 1,
        Frequency::Never | Frequency::Unknown => 0,
    }
}

fn panic_attack_points(answer: DualScaleAnswer, scale: AnswerScale) -> u8 {
    match scale {
        AnswerScale::Binary => match answer.binary {
            YesNo::Yes => 3,
            YesNo::No | YesNo::Uncertain | YesNo::Unknown => 0,
        },
        AnswerScale::Frequency => anxious_thoughts_points(answer.frequency),
    }
}

fn interest_points(interest: InterestLoss) -> u8 {
    match interest {
        InterestLoss::Completely => 3,
        InterestLoss::Somewhat => 2,
        InterestLoss::No | InterestLoss::Unknown => 0,
    }
}

fn feeling_worthy_points(answer: DualScaleAnswer, scale: AnswerScale) -> u8 {
    match scale {
        AnswerScale::Frequency => match answer.frequency {
            Frequency::VeryOften => 3,
            Frequency::Sometimes => 2,
            Frequency::Rarely | Frequency::Never | Frequency::Unknown => 0,
        },
        AnswerScale::Binary => match answer.binary {
            YesNo::Yes => 3,
            YesNo::Uncertain => 2,
            YesNo::No | YesNo::Unknown => 0,
        },
    }
}

pub fn sub_scores(answers: &QuestionnaireAnswers, config: &ScoringConfig) -> SubScores {
    SubScores {
        stress: mood_points(answers.mood) + sleep_points(answers.sleep),
        anxiety: anxious_thoughts_points(answers.anxious_thoughts)
            + panic_attack_points(answers.panic_attacks, config.panic_attacks),
        depression: interest_points(answers.interest)
            + feeling_worthy_points(answers.feeling_worthy, config.feeling_worthy),
    }
}

/// Maps a questionnaire to stress, anxiety and depression levels.
pub fn score_questionnaire(answers: &QuestionnaireAnswers, config: &ScoringConfig) -> ScoreResult {
    sub_scores(answers, config).into()
}

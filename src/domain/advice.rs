use crate::domain::questionnaire::{ScoreResult, SeverityLevel};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceDomain {
    Stress,
    Anxiety,
    Depression,
}

impl AdviceDomain {
    pub const ALL: [AdviceDomain; 3] = [
        AdviceDomain::Stress,
        AdviceDomain::Anxiety,
        AdviceDomain::Depression,
    ];

    fn fallback(&self) -> &'static str {
        match self {
            AdviceDomain::Stress => {
                "No specific stress guidance for this level. Keep a steady routine and check in with yourself regularly."
            }
            AdviceDomain::Anxiety => {
                "No specific anxiety guidance for this level. Notice what triggers worry and take slow, deep breaths."
            }
            AdviceDomain::Depression => {
                "No specific guidance for this mood level. Stay connected with people you trust and be kind to yourself."
            }
        }
    }
}

/// Which set of advice texts to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceTable {
    /// Three entries per domain, used for questionnaire results.
    Questionnaire,
    /// Two entries (`High`, `Low`) per domain, used for journal assessments.
    Journal,
}

type Table = HashMap<(AdviceDomain, SeverityLevel), &'static str>;

static QUESTIONNAIRE_ADVICE: Lazy<Table> = Lazy::new(|| {
    use AdviceDomain::*;
    use SeverityLevel::*;
    HashMap::from([
        ((Stress, High), "Consider relaxation techniques, mindfulness exercises, and seeking professional help."),
        ((Stress, Moderate), "Try managing stress through exercise, proper sleep, and healthy lifestyle choices."),
        ((Stress, Low), "Maintain a balanced routine, continue self-care, and stay mindful."),
        ((Anxiety, High), "Consult a healthcare provider for anxiety management, including therapy and medication."),
        ((Anxiety, Moderate), "Practice relaxation methods like deep breathing or yoga."),
        ((Anxiety, Low), "Engage in positive activities that reduce stress and enhance well-being."),
        ((Depression, High), "Seek professional help, including therapy and possibly medication. Consider engaging in social activities."),
        ((Depression, Moderate), "Talk with a close friend, family member, or counselor. Consider engaging in light physical activities."),
        ((Depression, Low), "Continue with your regular activities, practice mindfulness, and focus on self-care."),
    ])
});

static JOURNAL_ADVICE: Lazy<Table> = Lazy::new(|| {
    use AdviceDomain::*;
    use SeverityLevel::*;
    HashMap::from([
        ((Stress, High), "Your writing shows signs of high stress. Take short breaks, move your body, and consider talking to a professional."),
        ((Stress, Low), "Your stress looks manageable. Keep the habits that help you unwind."),
        ((Anxiety, High), "Your entry suggests a lot of worry. Try grounding exercises and reach out to someone you trust or a counselor."),
        ((Anxiety, Low), "Anxiety seems low today. Keep noticing what helps you feel calm."),
        ((Depression, High), "Your words suggest a heavy mood. Please consider reaching out to a mental health professional or a close friend."),
        ((Depression, Low), "Your mood seems steady. Keep doing the things that bring you joy and connection."),
    ])
});

impl AdviceTable {
    /// Looks up advice in this table, falling back to a fixed per-domain text
    /// when the table has no entry for the level.
    pub fn resolve(self, level: SeverityLevel, domain: AdviceDomain) -> &'static str {
        match self {
            AdviceTable::Questionnaire => resolve_advice(level, domain),
            AdviceTable::Journal => lookup(&JOURNAL_ADVICE, level, domain),
        }
    }
}

/// Looks up the questionnaire advice for a level in a domain.
pub fn resolve_advice(level: SeverityLevel, domain: AdviceDomain) -> &'static str {
    lookup(&QUESTIONNAIRE_ADVICE, level, domain)
}

fn lookup(entries: &Table, level: SeverityLevel, domain: AdviceDomain) -> &'static str {
    entries
        .get(&(domain, level))
        .copied()
        .unwrap_or_else(|| domain.fallback())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceBundle {
    pub stress_solution: String,
    pub anxiety_solution: String,
    pub depression_solution: String,
}

impl AdviceBundle {
    pub fn for_scores(table: AdviceTable, scores: &ScoreResult) -> Self {
        let [stress_solution, anxiety_solution, depression_solution] =
            AdviceDomain::ALL.map(|domain| table.resolve(scores.level(domain), domain).to_string());
        Self {
            stress_solution,
            anxiety_solution,
            depression_solution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    SeekProfessionalHelp,
    ModerateConcern,
    DoingWell,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::SeekProfessionalHelp => {
                "Your responses suggest you may be experiencing high levels of stress, anxiety, or depression. Please consider consulting a mental health professional."
            }
            Recommendation::ModerateConcern => {
                "You appear to have moderate mental health concerns. Engage in mindfulness, regular exercise, and self-care. Seek professional advice if needed."
            }
            Recommendation::DoingWell => {
                "You seem to be doing well overall. Keep up your positive mental health habits!"
            }
        }
    }
}

/// Two or more `High` levels win over two or more `Moderate` levels.
pub fn final_recommendation(
    stress: SeverityLevel,
    anxiety: SeverityLevel,
    depression: SeverityLevel,
) -> Recommendation {
    let levels = [stress, anxiety, depression];
    let count = |wanted: SeverityLevel| levels.iter().filter(|l| **l == wanted).count();

    if count(SeverityLevel::High) >= 2 {
        Recommendation::SeekProfessionalHelp
    } else if count(SeverityLevel::Moderate) >= 2 {
        Recommendation::ModerateConcern
    } else {
        Recommendation::DoingWell
    }
}

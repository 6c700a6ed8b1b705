use serde::{Deserialize, Serialize};

use crate::models::activity::LearningKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// A freshly generated path has made no progress yet.
    pub path_confidence: i32,
    pub answer_confidence: i32,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self { path_confidence: 0, answer_confidence: 85 }
    }
}

pub fn confidence(kind: LearningKind, config: &LearningConfig) -> i32 {
    let value = match kind {
        LearningKind::LearningPath => config.path_confidence,
        LearningKind::Question => config.answer_confidence,
    };
    value.clamp(0, 100)
}

/// Dashboard label earned by the number of learning activities.
pub fn education_level(activity_count: i64) -> &'static str {
    match activity_count {
        i64::MIN..=0 => "Beginner",
        1..=4 => "Explorer",
        5..=9 => "Learner",
        10..=19 => "Scholar",
        _ => "Expert",
    }
}

//! Pure scoring heuristics. Every function here is total: it never fails and
//! always returns scores inside `[0, 100]`.
//!
//! Keyword lists and numeric constants are plain configuration; the defaults
//! below are what a fresh deployment uses unless `SCORING_CONFIG` points at a
//! JSON file overriding some of them.

pub mod learning;
pub mod nutrition;
pub mod sentiment;
pub mod wellness;

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub sentiment: sentiment::SentimentConfig,
    pub wellness: wellness::WellnessConfig,
    pub nutrition: nutrition::NutritionConfig,
    pub waste: nutrition::WasteConfig,
    pub learning: learning::LearningConfig,
}

impl ScoringConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        serde_json::from_str(&raw).map_err(|e| format!("invalid {}: {}", path.display(), e))
    }
}

pub(crate) fn clamp_score(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as i32
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{ "wellness": { "sleep_target_hours": 7.0 } }"#).unwrap();
        assert_eq!(config.wellness.sleep_target_hours, 7.0);
        assert_eq!(config.wellness.exercise_target_minutes, 30.0);
        assert_eq!(config.nutrition.base_score, 50);
        assert!(!config.sentiment.positive_words.is_empty());
    }

    #[test]
    fn test_from_file_reads_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "waste": {{ "points_per_item": 20 }} }}"#).unwrap();

        let config = ScoringConfig::from_file(file.path()).unwrap();
        assert_eq!(config.waste.points_per_item, 20);
        assert_eq!(config.learning.answer_confidence, 85);
    }

    #[test]
    fn test_from_file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("scoring.json");
        let err = ScoringConfig::from_file(&missing).unwrap_err();
        assert!(err.starts_with("cannot read"));
        assert!(err.contains("scoring.json"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ScoringConfig::from_file(file.path()).unwrap_err();
        assert!(err.starts_with("invalid"));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(49.5), 50);
        assert_eq!(clamp_score(250.0), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
    }
}

use serde::{Deserialize, Serialize};

use super::{clamp_score, round2};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WellnessConfig {
    pub sleep_target_hours: f64,
    pub exercise_target_minutes: f64,
    pub water_target_glasses: f64,
    /// A sub-score below this triggers that category's suggestion.
    pub recommendation_threshold: f64,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            sleep_target_hours: 8.0,
            exercise_target_minutes: 30.0,
            water_target_glasses: 8.0,
            recommendation_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessInput {
    pub sleep_hours: f64,
    pub exercise_minutes: f64,
    pub water_glasses: f64,
}

/// Stored as the payload of a wellness health record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessBreakdown {
    pub sleep_hours: f64,
    pub exercise_minutes: f64,
    pub water_glasses: f64,
    pub sleep_score: f64,
    pub exercise_score: f64,
    pub water_score: f64,
    pub overall_score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WellnessReport {
    pub wellness_score: i32,
    pub breakdown: WellnessBreakdown,
    pub recommendations: Vec<String>,
}

fn sub_score(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

pub fn score(input: &WellnessInput, config: &WellnessConfig) -> WellnessReport {
    let sleep_score = sub_score(input.sleep_hours, config.sleep_target_hours);
    let exercise_score = sub_score(input.exercise_minutes, config.exercise_target_minutes);
    let water_score = sub_score(input.water_glasses, config.water_target_glasses);
    let wellness_score = clamp_score((sleep_score + exercise_score + water_score) / 3.0);

    let mut recommendations = Vec::new();
    if sleep_score < config.recommendation_threshold {
        recommendations.push("Aim for 7-9 hours of quality sleep each night".to_string());
    }
    if exercise_score < config.recommendation_threshold {
        recommendations.push("Try to get at least 30 minutes of physical activity daily".to_string());
    }
    if water_score < config.recommendation_threshold {
        recommendations.push("Increase water intake to 8 glasses per day".to_string());
    }
    recommendations.push(
        match wellness_score {
            80.. => "Great job maintaining excellent wellness habits!",
            60..=79 => "You're on the right track - small improvements can make a big difference",
            _ => "Focus on gradual improvements in sleep, exercise, and hydration",
        }
        .to_string(),
    );

    WellnessReport {
        wellness_score,
        breakdown: WellnessBreakdown {
            sleep_hours: input.sleep_hours,
            exercise_minutes: input.exercise_minutes,
            water_glasses: input.water_glasses,
            sleep_score: round2(sleep_score),
            exercise_score: round2(exercise_score),
            water_score: round2(water_score),
            overall_score: wellness_score,
        },
        recommendations,
    }
}

/// Dashboard label for an average wellness score.
pub fn health_status(average: f64) -> &'static str {
    if average >= 80.0 {
        "Excellent"
    } else if average >= 60.0 {
        "Good"
    } else if average >= 40.0 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

//! Per-request dashboard snapshot across the three SDG categories.
//!
//! Nothing here is cached: every call re-reads the store. Records that were
//! stored without a score but still carry their raw input are scored on the
//! fly; records that cannot be scored are counted but left out of averages.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::{
    ActivityKind, HealthKind, HealthRecord, LearningActivity, LearningKind, Level, NutritionKind,
    NutritionRecord,
};
use crate::scoring::{self, learning, nutrition, sentiment, wellness, ScoringConfig};
use crate::store::{ActivityStore, Page};
use crate::utils::validation::split_list;

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub email: String,
    pub is_premium: bool,
    pub premium_expires: Option<String>,
    pub member_since: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ActivityCounts {
    pub learning_activities: i64,
    pub health_tracking: i64,
    pub meal_plans: i64,
    pub waste_reduction: i64,
}

#[derive(Debug, Serialize)]
pub struct EducationProgress {
    pub total_activities: i64,
    pub average_progress: f64,
    pub level: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthProgress {
    pub tracking_sessions: usize,
    pub average_score: f64,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NutritionProgress {
    pub meal_plans: i64,
    pub waste_reduction_actions: i64,
    pub average_nutrition_score: f64,
    pub average_impact_score: f64,
}

#[derive(Debug, Serialize)]
pub struct SdgProgress {
    pub education: EducationProgress,
    pub health: HealthProgress,
    pub nutrition: NutritionProgress,
}

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub kind: LearningKind,
    pub topic: String,
    pub level: Option<Level>,
    pub progress: i32,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct RecentHealth {
    #[serde(rename = "type")]
    pub kind: HealthKind,
    pub score: Option<i32>,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub user_info: UserInfo,
    pub activity_counts: ActivityCounts,
    pub sdg_progress: SdgProgress,
    pub wellness_score: i32,
    pub recent_activities: Vec<RecentActivity>,
    pub recent_health: Vec<RecentHealth>,
}

/// Mean of the given scores rounded to two decimals, 0 when there are none.
fn average(scores: impl IntoIterator<Item = i32>) -> f64 {
    let (sum, n) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, n), s| (sum + s as i64, n + 1));
    if n == 0 {
        return 0.0;
    }
    scoring::round2(sum as f64 / n as f64)
}

pub fn health_score(record: &HealthRecord, config: &ScoringConfig) -> Option<i32> {
    if let Some(score) = record.score {
        return Some(score.clamp(0, 100));
    }
    match record.kind {
        HealthKind::Wellness => serde_json::from_value::<wellness::WellnessInput>(record.payload.clone())
            .ok()
            .map(|input| wellness::score(&input, &config.wellness).wellness_score),
        HealthKind::MentalHealth => record
            .payload
            .get("mood_text")
            .and_then(|t| t.as_str())
            .map(|text| sentiment::analyze(text, &config.sentiment).mood_score),
        HealthKind::HealthQuestion => None,
    }
}

pub fn nutrition_score(record: &NutritionRecord, config: &ScoringConfig) -> Option<i32> {
    if let Some(score) = record.score {
        return Some(score.clamp(0, 100));
    }
    let items = split_list(&record.items);
    match record.kind {
        NutritionKind::MealPlan if !items.is_empty() => {
            Some(nutrition::score_ingredients(&items, &config.nutrition).nutrition_score)
        }
        NutritionKind::FoodWaste if !items.is_empty() => {
            Some(nutrition::waste_impact(items.len(), &config.waste).impact_score)
        }
        _ => None,
    }
}

fn education_progress(activities: &[LearningActivity], total: i64) -> EducationProgress {
    EducationProgress {
        total_activities: total,
        average_progress: average(activities.iter().map(|a| a.confidence.clamp(0, 100))),
        level: learning::education_level(total),
    }
}

fn health_progress(records: &[HealthRecord], config: &ScoringConfig) -> HealthProgress {
    let scores: Vec<i32> = records.iter().filter_map(|r| health_score(r, config)).collect();
    let average_score = average(scores.iter().copied());
    HealthProgress {
        tracking_sessions: scores.len(),
        average_score,
        status: wellness::health_status(average_score),
    }
}

fn nutrition_progress(
    records: &[NutritionRecord],
    counts: &ActivityCounts,
    config: &ScoringConfig,
) -> NutritionProgress {
    let scored: Vec<(NutritionKind, i32)> = records
        .iter()
        .filter_map(|r| nutrition_score(r, config).map(|s| (r.kind, s)))
        .collect();

    NutritionProgress {
        meal_plans: counts.meal_plans,
        waste_reduction_actions: counts.waste_reduction,
        average_nutrition_score: average(scored.iter().map(|(_, s)| *s)),
        average_impact_score: average(
            scored
                .iter()
                .filter(|(kind, _)| *kind == NutritionKind::FoodWaste)
                .map(|(_, s)| *s),
        ),
    }
}

/// Blended 0-100 score over the three SDG averages.
pub fn blended_wellness(progress: &SdgProgress) -> i32 {
    scoring::clamp_score(
        (progress.education.average_progress
            + progress.health.average_score
            + progress.nutrition.average_nutrition_score)
            / 3.0,
    )
}

/// Builds the snapshot for `user_id`, or fails with `NotFound` for an unknown
/// user. Any store failure aborts the whole snapshot.
pub async fn build_snapshot(
    store: &dyn ActivityStore,
    user_id: Uuid,
    recent_limit: usize,
    config: &ScoringConfig,
) -> Result<DashboardSnapshot, AppError> {
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let counts = ActivityCounts {
        learning_activities: store.count(user_id, ActivityKind::Learning).await?,
        health_tracking: store.count(user_id, ActivityKind::HealthTracking).await?,
        meal_plans: store.count(user_id, ActivityKind::MealPlans).await?,
        waste_reduction: store.count(user_id, ActivityKind::WasteReduction).await?,
    };

    let learning = store.learning_activities(user_id, Page::all()).await?;
    let health = store.health_records(user_id, Page::all()).await?;
    let nutrition = store.nutrition_records(user_id, Page::all()).await?;

    let sdg_progress = SdgProgress {
        education: education_progress(&learning, counts.learning_activities),
        health: health_progress(&health, config),
        nutrition: nutrition_progress(&nutrition, &counts, config),
    };
    let wellness_score = blended_wellness(&sdg_progress);

    let recent_activities = learning
        .iter()
        .take(recent_limit)
        .map(|a| RecentActivity {
            kind: a.kind,
            topic: a.topic.clone(),
            level: a.level,
            progress: a.confidence,
            date: a.created_at.to_rfc3339(),
        })
        .collect();

    let recent_health = health
        .iter()
        .take(recent_limit)
        .map(|r| RecentHealth {
            kind: r.kind,
            score: health_score(r, config),
            date: r.created_at.to_rfc3339(),
        })
        .collect();

    Ok(DashboardSnapshot {
        user_info: UserInfo {
            email: user.email,
            is_premium: user.is_premium,
            premium_expires: user.premium_expires.map(|t| t.to_rfc3339()),
            member_since: user.created_at.to_rfc3339(),
        },
        activity_counts: counts,
        sdg_progress,
        wellness_score,
        recent_activities,
        recent_health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::{
        NewHealthRecord, NewLearningActivity, NewNutritionRecord, NewRecord,
    };
    use crate::store::MemoryStore;
    use serde_json::json;

    fn learning(user_id: Uuid, topic: &str, confidence: i32) -> NewRecord {
        NewRecord::Learning(NewLearningActivity {
            user_id,
            kind: LearningKind::Question,
            topic: topic.to_string(),
            level: None,
            content: String::new(),
            confidence,
        })
    }

    fn health(user_id: Uuid, kind: HealthKind, score: Option<i32>, payload: serde_json::Value) -> NewRecord {
        NewRecord::Health(NewHealthRecord { user_id, kind, score, payload })
    }

    fn nutrition(user_id: Uuid, kind: NutritionKind, score: Option<i32>, items: &str) -> NewRecord {
        NewRecord::Nutrition(NewNutritionRecord {
            user_id,
            kind,
            score,
            items: items.to_string(),
            payload: json!({}),
        })
    }

    async fn store_with_user() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let user = store.create_user("dash@example.com", "hash").await.unwrap().unwrap();
        (store, user.user_id)
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let result = build_snapshot(&store, Uuid::now_v7(), 5, &ScoringConfig::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_user_has_zero_averages() {
        let (store, user_id) = store_with_user().await;
        let snapshot = build_snapshot(&store, user_id, 5, &ScoringConfig::default()).await.unwrap();

        assert_eq!(
            snapshot.activity_counts,
            ActivityCounts { learning_activities: 0, health_tracking: 0, meal_plans: 0, waste_reduction: 0 }
        );
        assert_eq!(snapshot.sdg_progress.education.average_progress, 0.0);
        assert_eq!(snapshot.sdg_progress.health.average_score, 0.0);
        assert_eq!(snapshot.sdg_progress.nutrition.average_nutrition_score, 0.0);
        assert_eq!(snapshot.wellness_score, 0);
        assert!(snapshot.recent_activities.is_empty());
        assert_eq!(snapshot.sdg_progress.education.level, "Beginner");
    }

    #[tokio::test]
    async fn test_education_average_progress() {
        let (store, user_id) = store_with_user().await;
        for confidence in [80, 60, 100] {
            store.insert(learning(user_id, "topic", confidence)).await.unwrap();
        }

        let snapshot = build_snapshot(&store, user_id, 5, &ScoringConfig::default()).await.unwrap();
        assert_eq!(snapshot.sdg_progress.education.average_progress, 80.0);
        assert_eq!(snapshot.sdg_progress.education.total_activities, 3);
        assert_eq!(snapshot.sdg_progress.education.level, "Explorer");
    }

    #[tokio::test]
    async fn test_unscorable_rows_counted_but_not_averaged() {
        let (store, user_id) = store_with_user().await;
        store.insert(health(user_id, HealthKind::Wellness, Some(60), json!({}))).await.unwrap();
        store.insert(health(user_id, HealthKind::HealthQuestion, None, json!({"question": "?"}))).await.unwrap();
        store.insert(nutrition(user_id, NutritionKind::NutritionAdvice, None, "")).await.unwrap();
        store.insert(nutrition(user_id, NutritionKind::MealPlan, Some(70), "kale")).await.unwrap();

        let snapshot = build_snapshot(&store, user_id, 5, &ScoringConfig::default()).await.unwrap();
        assert_eq!(snapshot.activity_counts.health_tracking, 2);
        assert_eq!(snapshot.sdg_progress.health.tracking_sessions, 1);
        assert_eq!(snapshot.sdg_progress.health.average_score, 60.0);
        assert_eq!(snapshot.sdg_progress.nutrition.average_nutrition_score, 70.0);
        assert_eq!(snapshot.activity_counts.meal_plans, 1);
        assert_eq!(snapshot.activity_counts.waste_reduction, 0);
    }

    #[tokio::test]
    async fn test_missing_scores_are_recomputed_from_payload() {
        let (store, user_id) = store_with_user().await;
        let payload = json!({"sleep_hours": 4.0, "exercise_minutes": 15.0, "water_glasses": 4.0});
        store.insert(health(user_id, HealthKind::Wellness, None, payload)).await.unwrap();
        store.insert(nutrition(user_id, NutritionKind::FoodWaste, None, "milk, bread, apples")).await.unwrap();

        let snapshot = build_snapshot(&store, user_id, 5, &ScoringConfig::default()).await.unwrap();
        assert_eq!(snapshot.sdg_progress.health.average_score, 50.0);
        assert_eq!(snapshot.recent_health[0].score, Some(50));
        assert_eq!(snapshot.sdg_progress.nutrition.average_impact_score, 30.0);
    }

    #[tokio::test]
    async fn test_blended_wellness_and_recent_ordering() {
        let (store, user_id) = store_with_user().await;
        for i in 0..7 {
            store.insert(learning(user_id, &format!("topic-{}", i), 90)).await.unwrap();
        }
        store.insert(health(user_id, HealthKind::Wellness, Some(60), json!({}))).await.unwrap();
        store.insert(nutrition(user_id, NutritionKind::MealPlan, Some(75), "oats")).await.unwrap();

        let snapshot = build_snapshot(&store, user_id, 5, &ScoringConfig::default()).await.unwrap();
        assert_eq!(snapshot.wellness_score, 75);
        assert_eq!(snapshot.recent_activities.len(), 5);
        assert_eq!(snapshot.recent_activities[0].topic, "topic-6");
        assert_eq!(snapshot.recent_activities[4].topic, "topic-2");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = DashboardSnapshot {
            user_info: UserInfo {
                email: "a@example.com".to_string(),
                is_premium: false,
                premium_expires: None,
                member_since: "2024-01-01T00:00:00+00:00".to_string(),
            },
            activity_counts: ActivityCounts { learning_activities: 1, health_tracking: 0, meal_plans: 0, waste_reduction: 0 },
            sdg_progress: SdgProgress {
                education: education_progress(&[], 0),
                health: health_progress(&[], &ScoringConfig::default()),
                nutrition: NutritionProgress { meal_plans: 0, waste_reduction_actions: 0, average_nutrition_score: 0.0, average_impact_score: 0.0 },
            },
            wellness_score: 0,
            recent_activities: vec![],
            recent_health: vec![],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        for field in ["activity_counts", "sdg_progress", "wellness_score", "recent_activities", "recent_health"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["sdg_progress"]["health"]["status"], "Needs Improvement");
    }
}

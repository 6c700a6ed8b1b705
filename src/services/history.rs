use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::{
    Category, HealthKind, HealthRecord, LearningActivity, LearningKind, Level, NutritionKind,
    NutritionRecord,
};
use crate::store::{ActivityStore, Page};

#[derive(Debug, Serialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub kind: LearningKind,
    pub topic: String,
    pub level: Option<Level>,
    pub content: String,
    pub confidence: i32,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct HealthEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: HealthKind,
    pub score: Option<i32>,
    pub payload: serde_json::Value,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct NutritionEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NutritionKind,
    pub score: Option<i32>,
    pub items: String,
    pub payload: serde_json::Value,
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Education(EducationEntry),
    Health(HealthEntry),
    Nutrition(NutritionEntry),
}

impl From<LearningActivity> for HistoryEntry {
    fn from(a: LearningActivity) -> Self {
        HistoryEntry::Education(EducationEntry {
            id: a.id,
            kind: a.kind,
            topic: a.topic,
            level: a.level,
            content: a.content,
            confidence: a.confidence,
            date: a.created_at.to_rfc3339(),
        })
    }
}

impl From<HealthRecord> for HistoryEntry {
    fn from(r: HealthRecord) -> Self {
        HistoryEntry::Health(HealthEntry {
            id: r.id,
            kind: r.kind,
            score: r.score,
            payload: r.payload,
            date: r.created_at.to_rfc3339(),
        })
    }
}

impl From<NutritionRecord> for HistoryEntry {
    fn from(r: NutritionRecord) -> Self {
        HistoryEntry::Nutrition(NutritionEntry {
            id: r.id,
            kind: r.kind,
            score: r.score,
            items: r.items,
            payload: r.payload,
            date: r.created_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub category: Category,
    pub history: Vec<HistoryEntry>,
}

/// One category's records for `user_id`, newest first. An existing user with
/// no records gets an empty page; an unknown user is `NotFound`.
pub async fn fetch_history(
    store: &dyn ActivityStore,
    user_id: Uuid,
    category: Category,
    page: Page,
) -> Result<HistoryPage, AppError> {
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let history = match category {
        Category::Education => into_entries(store.learning_activities(user_id, page).await?),
        Category::Health => into_entries(store.health_records(user_id, page).await?),
        Category::Nutrition => into_entries(store.nutrition_records(user_id, page).await?),
    };

    Ok(HistoryPage { category, history })
}

fn into_entries<T: Into<HistoryEntry>>(rows: Vec<T>) -> Vec<HistoryEntry> {
    rows.into_iter().map(Into::into).collect()
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// SDG bucket an activity belongs to. Also the `{category}` of the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Education,
    Health,
    Nutrition,
}

text_enum!(Category {
    Education => "education",
    Health => "health",
    Nutrition => "nutrition",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningKind {
    LearningPath,
    Question,
}

text_enum!(LearningKind {
    LearningPath => "learning_path",
    Question => "question",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

text_enum!(Level {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthKind {
    MentalHealth,
    Wellness,
    HealthQuestion,
}

text_enum!(HealthKind {
    MentalHealth => "mental_health",
    Wellness => "wellness",
    HealthQuestion => "health_question",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionKind {
    MealPlan,
    FoodWaste,
    NutritionAdvice,
}

text_enum!(NutritionKind {
    MealPlan => "meal_plan",
    FoodWaste => "food_waste",
    NutritionAdvice => "nutrition_advice",
});

/// Activity counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Learning,
    HealthTracking,
    MealPlans,
    WasteReduction,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LearningActivity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: LearningKind,
    pub topic: String,
    pub level: Option<Level>,
    pub content: String,
    pub confidence: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: HealthKind,
    pub score: Option<i32>,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NutritionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NutritionKind,
    pub score: Option<i32>,
    pub items: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLearningActivity {
    pub user_id: Uuid,
    pub kind: LearningKind,
    pub topic: String,
    pub level: Option<Level>,
    pub content: String,
    pub confidence: i32,
}

#[derive(Debug, Clone)]
pub struct NewHealthRecord {
    pub user_id: Uuid,
    pub kind: HealthKind,
    pub score: Option<i32>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct NewNutritionRecord {
    pub user_id: Uuid,
    pub kind: NutritionKind,
    pub score: Option<i32>,
    pub items: String,
    pub payload: serde_json::Value,
}

/// A record about to be inserted. The store assigns its id and timestamp.
#[derive(Debug, Clone)]
pub enum NewRecord {
    Learning(NewLearningActivity),
    Health(NewHealthRecord),
    Nutrition(NewNutritionRecord),
}

impl NewRecord {
    pub fn user_id(&self) -> Uuid {
        match self {
            NewRecord::Learning(r) => r.user_id,
            NewRecord::Health(r) => r.user_id,
            NewRecord::Nutrition(r) => r.user_id,
        }
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ActivityStore, Page, StoreError, StoreResult};
use crate::models::activity::{
    ActivityKind, HealthRecord, LearningActivity, NewRecord, NutritionKind, NutritionRecord,
};
use crate::models::user::User;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    learning: Vec<LearningActivity>,
    health: Vec<HealthRecord>,
    nutrition: Vec<NutritionRecord>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Creation timestamps never go backwards, even if the wall clock does.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if last >= now => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

/// In-process store used for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rows are kept in insertion order, so newest-first is a reverse walk.
fn newest_first<T: Clone>(rows: &[T], owner: impl Fn(&T) -> bool, page: Page) -> Vec<T> {
    let owned: Vec<T> = rows.iter().rev().filter(|r| owner(r)).cloned().collect();
    page.slice(&owned)
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Ok(None);
        }

        let now = tables.next_timestamp();
        let user = User {
            user_id: Uuid::now_v7(),
            email: email.to_string(),
            password: password_hash.to_string(),
            is_premium: false,
            premium_expires: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(Some(user))
    }

    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, record: NewRecord) -> StoreResult<Uuid> {
        let mut tables = self.tables.write().await;
        let owner = record.user_id();
        if !tables.users.iter().any(|u| u.user_id == owner) {
            return Err(StoreError::UnknownUser(owner));
        }

        let id = Uuid::now_v7();
        let created_at = tables.next_timestamp();

        match record {
            NewRecord::Learning(r) => tables.learning.push(LearningActivity {
                id,
                user_id: r.user_id,
                kind: r.kind,
                topic: r.topic,
                level: r.level,
                content: r.content,
                confidence: r.confidence,
                created_at,
            }),
            NewRecord::Health(r) => tables.health.push(HealthRecord {
                id,
                user_id: r.user_id,
                kind: r.kind,
                score: r.score,
                payload: r.payload,
                created_at,
            }),
            NewRecord::Nutrition(r) => tables.nutrition.push(NutritionRecord {
                id,
                user_id: r.user_id,
                kind: r.kind,
                score: r.score,
                items: r.items,
                payload: r.payload,
                created_at,
            }),
        }

        Ok(id)
    }

    async fn learning_activities(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<LearningActivity>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.learning, |r| r.user_id == user_id, page))
    }

    async fn health_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<HealthRecord>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.health, |r| r.user_id == user_id, page))
    }

    async fn nutrition_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<NutritionRecord>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.nutrition, |r| r.user_id == user_id, page))
    }

    async fn count(&self, user_id: Uuid, kind: ActivityKind) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let n = match kind {
            ActivityKind::Learning => tables.learning.iter().filter(|r| r.user_id == user_id).count(),
            ActivityKind::HealthTracking => tables.health.iter().filter(|r| r.user_id == user_id).count(),
            ActivityKind::MealPlans => tables
                .nutrition
                .iter()
                .filter(|r| r.user_id == user_id && r.kind == NutritionKind::MealPlan)
                .count(),
            ActivityKind::WasteReduction => tables
                .nutrition
                .iter()
                .filter(|r| r.user_id == user_id && r.kind == NutritionKind::FoodWaste)
                .count(),
        };
        Ok(n as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::{HealthKind, NewHealthRecord, NewNutritionRecord};
    use serde_json::json;

    fn health(user_id: Uuid, score: i32) -> NewRecord {
        NewRecord::Health(NewHealthRecord {
            user_id,
            kind: HealthKind::Wellness,
            score: Some(score),
            payload: json!({}),
        })
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        assert!(store.create_user("a@example.com", "hash").await.unwrap().is_some());
        assert!(store.create_user("a@example.com", "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_records_are_newest_first_and_scoped_to_user() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice@example.com", "h").await.unwrap().unwrap();
        let bob = store.create_user("bob@example.com", "h").await.unwrap().unwrap();

        store.insert(health(alice.user_id, 10)).await.unwrap();
        store.insert(health(bob.user_id, 99)).await.unwrap();
        store.insert(health(alice.user_id, 20)).await.unwrap();
        store.insert(health(alice.user_id, 30)).await.unwrap();

        let rows = store.health_records(alice.user_id, Page::all()).await.unwrap();
        let scores: Vec<_> = rows.iter().map(|r| r.score.unwrap()).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert!(rows.windows(2).all(|w| w[0].created_at > w[1].created_at));

        let page = store
            .health_records(alice.user_id, Page { limit: Some(1), offset: 1 })
            .await
            .unwrap();
        assert_eq!(page[0].score, Some(20));
    }

    #[tokio::test]
    async fn test_count_splits_nutrition_kinds() {
        let store = MemoryStore::new();
        let user = store.create_user("n@example.com", "h").await.unwrap().unwrap().user_id;
        for kind in [NutritionKind::MealPlan, NutritionKind::FoodWaste, NutritionKind::FoodWaste, NutritionKind::NutritionAdvice] {
            store
                .insert(NewRecord::Nutrition(NewNutritionRecord {
                    user_id: user,
                    kind,
                    score: None,
                    items: String::new(),
                    payload: json!({}),
                }))
                .await
                .unwrap();
        }

        assert_eq!(store.count(user, ActivityKind::MealPlans).await.unwrap(), 1);
        assert_eq!(store.count(user, ActivityKind::WasteReduction).await.unwrap(), 2);
        assert_eq!(store.count(user, ActivityKind::Learning).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_owner() {
        let store = MemoryStore::new();
        let ghost = Uuid::now_v7();

        let result = store.insert(health(ghost, 50)).await;
        assert!(matches!(result, Err(StoreError::UnknownUser(id)) if id == ghost));
        assert_eq!(store.count(ghost, ActivityKind::HealthTracking).await.unwrap(), 0);
    }
}

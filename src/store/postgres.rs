use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use super::{ActivityStore, Page, StoreError, StoreResult};
use crate::models::activity::{
    ActivityKind, HealthRecord, LearningActivity, NewRecord, NutritionRecord,
};
use crate::models::user::User;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        is_premium BOOLEAN NOT NULL DEFAULT FALSE,
        premium_expires TIMESTAMPTZ NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS learning_activities (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        kind TEXT NOT NULL,
        topic TEXT NOT NULL,
        level TEXT NULL,
        content TEXT NOT NULL,
        confidence INT NOT NULL CHECK (confidence BETWEEN 0 AND 100),
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS health_records (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        kind TEXT NOT NULL,
        score INT NULL CHECK (score BETWEEN 0 AND 100),
        payload JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nutrition_records (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        kind TEXT NOT NULL,
        score INT NULL CHECK (score BETWEEN 0 AND 100),
        items TEXT NOT NULL,
        payload JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS learning_activities_user_idx ON learning_activities (user_id, created_at DESC)",
    "CREATE INDEX IF NOT EXISTS health_records_user_idx ON health_records (user_id, created_at DESC)",
    "CREATE INDEX IF NOT EXISTS nutrition_records_user_idx ON nutrition_records (user_id, created_at DESC)",
];

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[derive(sqlx::FromRow)]
struct LearningRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    topic: String,
    level: Option<String>,
    content: String,
    confidence: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<LearningRow> for LearningActivity {
    type Error = StoreError;

    fn try_from(row: LearningRow) -> Result<Self, Self::Error> {
        Ok(LearningActivity {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind.parse().map_err(StoreError::Corrupt)?,
            topic: row.topic,
            level: row.level.map(|l| l.parse()).transpose().map_err(StoreError::Corrupt)?,
            content: row.content,
            confidence: row.confidence,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HealthRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    score: Option<i32>,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<HealthRow> for HealthRecord {
    type Error = StoreError;

    fn try_from(row: HealthRow) -> Result<Self, Self::Error> {
        Ok(HealthRecord {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind.parse().map_err(StoreError::Corrupt)?,
            score: row.score,
            payload: row.payload,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NutritionRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    score: Option<i32>,
    items: String,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<NutritionRow> for NutritionRecord {
    type Error = StoreError;

    fn try_from(row: NutritionRow) -> Result<Self, Self::Error> {
        Ok(NutritionRecord {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind.parse().map_err(StoreError::Corrupt)?,
            score: row.score,
            items: row.items,
            payload: row.payload,
            created_at: row.created_at,
        })
    }
}

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Every child table references `users`, so a foreign key failure on insert
/// means the owner is gone.
fn insert_error(err: sqlx::Error, owner: Uuid) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            StoreError::UnknownUser(owner)
        }
        _ => err.into(),
    }
}

fn decode_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        log::info!("Database schema ready");
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, email, password, is_premium, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, NOW(), NOW())
            ON CONFLICT (email) DO NOTHING
            RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, record: NewRecord) -> StoreResult<Uuid> {
        let id = Uuid::now_v7();
        let owner = record.user_id();

        // created_at comes from the database clock so every worker shares one timeline.
        let result = match record {
            NewRecord::Learning(r) => {
                sqlx::query(
                    "INSERT INTO learning_activities (id, user_id, kind, topic, level, content, confidence, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, clock_timestamp())",
                )
                .bind(id)
                .bind(r.user_id)
                .bind(r.kind.as_str())
                .bind(&r.topic)
                .bind(r.level.map(|l| l.as_str()))
                .bind(&r.content)
                .bind(r.confidence)
                .execute(&self.pool)
                .await
            }
            NewRecord::Health(r) => {
                sqlx::query(
                    "INSERT INTO health_records (id, user_id, kind, score, payload, created_at)
                    VALUES ($1, $2, $3, $4, $5, clock_timestamp())",
                )
                .bind(id)
                .bind(r.user_id)
                .bind(r.kind.as_str())
                .bind(r.score)
                .bind(&r.payload)
                .execute(&self.pool)
                .await
            }
            NewRecord::Nutrition(r) => {
                sqlx::query(
                    "INSERT INTO nutrition_records (id, user_id, kind, score, items, payload, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, clock_timestamp())",
                )
                .bind(id)
                .bind(r.user_id)
                .bind(r.kind.as_str())
                .bind(r.score)
                .bind(&r.items)
                .bind(&r.payload)
                .execute(&self.pool)
                .await
            }
        };

        result.map_err(|e| insert_error(e, owner))?;
        Ok(id)
    }

    async fn learning_activities(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<LearningActivity>> {
        let rows = sqlx::query_as::<_, LearningRow>(
            "SELECT * FROM learning_activities WHERE user_id = $1
            ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn health_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<HealthRecord>> {
        let rows = sqlx::query_as::<_, HealthRow>(
            "SELECT * FROM health_records WHERE user_id = $1
            ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn nutrition_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<NutritionRecord>> {
        let rows = sqlx::query_as::<_, NutritionRow>(
            "SELECT * FROM nutrition_records WHERE user_id = $1
            ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        decode_all(rows)
    }

    async fn count(&self, user_id: Uuid, kind: ActivityKind) -> StoreResult<i64> {
        let sql = match kind {
            ActivityKind::Learning => "SELECT COUNT(*) FROM learning_activities WHERE user_id = $1",
            ActivityKind::HealthTracking => "SELECT COUNT(*) FROM health_records WHERE user_id = $1",
            ActivityKind::MealPlans => {
                "SELECT COUNT(*) FROM nutrition_records WHERE user_id = $1 AND kind = 'meal_plan'"
            }
            ActivityKind::WasteReduction => {
                "SELECT COUNT(*) FROM nutrition_records WHERE user_id = $1 AND kind = 'food_waste'"
            }
        };

        let (count,): (i64,) = sqlx::query_as(sql).bind(user_id).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

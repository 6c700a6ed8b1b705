//! Persistence for users and their activity records.
//!
//! The store is the only state shared between requests. Every record is
//! written with a single insert and never updated afterwards.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::activity::{
    ActivityKind, HealthRecord, LearningActivity, NewRecord, NutritionRecord,
};
use crate::models::user::User;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    /// The record's owner does not exist.
    #[error("unknown user {0}")]
    UnknownUser(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Window over a newest-first result set. `limit: None` returns everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn first(limit: i64) -> Self {
        Self { limit: Some(limit), offset: 0 }
    }

    pub(crate) fn slice<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        let offset = self.offset.max(0) as usize;
        let iter = rows.iter().skip(offset).cloned();
        match self.limit {
            Some(limit) => iter.take(limit.max(0) as usize).collect(),
            None => iter.collect(),
        }
    }
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Returns `None` when the email is already registered.
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Option<User>>;

    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fails with [`StoreError::UnknownUser`] when the owner is not registered.
    async fn insert(&self, record: NewRecord) -> StoreResult<Uuid>;

    async fn learning_activities(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<LearningActivity>>;

    async fn health_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<HealthRecord>>;

    async fn nutrition_records(&self, user_id: Uuid, page: Page) -> StoreResult<Vec<NutritionRecord>>;

    async fn count(&self, user_id: Uuid, kind: ActivityKind) -> StoreResult<i64>;
}

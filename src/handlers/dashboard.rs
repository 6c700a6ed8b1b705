use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::activity::Category;
use crate::services::{dashboard, history};
use crate::store::{ActivityStore, Page};
use crate::utils::session::Session;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    offset: Option<i64>,
}

impl HistoryQuery {
    fn page(&self, config: &AppConfig) -> Page {
        let limit = self
            .limit
            .unwrap_or(config.history_default_limit)
            .min(config.history_max_limit);
        Page {
            offset: self.offset.unwrap_or(0),
            ..Page::first(limit)
        }
    }
}

// GET /api/user-dashboard
pub async fn user_dashboard(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let snapshot = dashboard::build_snapshot(
        store.get_ref(),
        session.user_id,
        config.recent_limit,
        &config.scoring,
    )
    .await?;

    Ok(HttpResponse::Ok().json(snapshot))
}

// GET /api/user-history/{category}
pub async fn user_history(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    category: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let category: Category = category
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid category".to_string()))?;
    validate_payload(&*query)?;

    let page = history::fetch_history(
        store.get_ref(),
        session.user_id,
        category,
        query.page(&config),
    )
    .await?;

    Ok(HttpResponse::Ok().json(page))
}

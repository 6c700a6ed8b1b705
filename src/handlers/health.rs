use actix_web::{web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::education::QuestionRequest;
use crate::models::activity::{HealthKind, NewHealthRecord, NewRecord};
use crate::scoring::sentiment::{self, Sentiment};
use crate::scoring::wellness::{self, WellnessBreakdown, WellnessInput};
use crate::services::content;
use crate::store::ActivityStore;
use crate::utils::session::Session;
use crate::utils::validation::{required_text, validate_payload};

#[derive(Deserialize, Validate)]
pub struct MoodRequest {
    #[validate(required(message = "Mood text is required"))]
    #[validate(length(min = 1, max = 5000, message = "Mood text must be between 1 and 5000 characters"))]
    mood_text: Option<String>,
}

#[derive(Serialize)]
pub struct MoodResponse {
    success: bool,
    assessment_id: Uuid,
    sentiment: Sentiment,
    confidence: f64,
    mood_score: i32,
    recommendations: Vec<String>,
}

#[derive(Deserialize, Validate)]
pub struct WellnessRequest {
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep hours must be between 0 and 24"))]
    sleep_hours: Option<f64>,

    #[validate(range(min = 0.0, max = 1440.0, message = "Exercise minutes must be between 0 and 1440"))]
    exercise_minutes: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "Water glasses must be between 0 and 100"))]
    water_glasses: Option<f64>,
}

#[derive(Serialize)]
pub struct WellnessResponse {
    success: bool,
    tracking_id: Uuid,
    wellness_score: i32,
    breakdown: WellnessBreakdown,
    recommendations: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthAnswerResponse {
    success: bool,
    record_id: Uuid,
    question: String,
    answer: String,
    disclaimer: &'static str,
}

// POST /api/analyze-mental-health
pub async fn analyze_mental_health(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<MoodRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let mood_text = required_text(&payload.mood_text, "Mood text")?;

    let report = sentiment::analyze(mood_text, &config.scoring.sentiment);
    let assessment_id = store
        .insert(NewRecord::Health(NewHealthRecord {
            user_id: user.user_id,
            kind: HealthKind::MentalHealth,
            score: Some(report.mood_score),
            payload: json!({
                "mood_text": mood_text,
                "sentiment": report.sentiment,
                "confidence": report.confidence,
                "recommendations": report.recommendations,
            }),
        }))
        .await?;

    info!("Stored mental health assessment {} for user {}", assessment_id, user.user_id);

    Ok(HttpResponse::Ok().json(MoodResponse {
        success: true,
        assessment_id,
        sentiment: report.sentiment,
        confidence: report.confidence,
        mood_score: report.mood_score,
        recommendations: report.recommendations,
    }))
}

// POST /api/track-wellness
pub async fn track_wellness(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<WellnessRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;

    let input = WellnessInput {
        sleep_hours: payload.sleep_hours.unwrap_or(0.0),
        exercise_minutes: payload.exercise_minutes.unwrap_or(0.0),
        water_glasses: payload.water_glasses.unwrap_or(0.0),
    };
    let report = wellness::score(&input, &config.scoring.wellness);

    let breakdown = serde_json::to_value(&report.breakdown)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let tracking_id = store
        .insert(NewRecord::Health(NewHealthRecord {
            user_id: user.user_id,
            kind: HealthKind::Wellness,
            score: Some(report.wellness_score),
            payload: breakdown,
        }))
        .await?;

    info!("Stored wellness entry {} for user {}", tracking_id, user.user_id);

    Ok(HttpResponse::Ok().json(WellnessResponse {
        success: true,
        tracking_id,
        wellness_score: report.wellness_score,
        breakdown: report.breakdown,
        recommendations: report.recommendations,
    }))
}

// POST /api/health-question
pub async fn health_question(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    payload: web::Json<QuestionRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let question = required_text(&payload.question, "Question")?.to_string();

    let answer = content::health_answer(&question);
    let record_id = store
        .insert(NewRecord::Health(NewHealthRecord {
            user_id: user.user_id,
            kind: HealthKind::HealthQuestion,
            score: None,
            payload: json!({ "question": question, "answer": answer }),
        }))
        .await?;

    Ok(HttpResponse::Ok().json(HealthAnswerResponse {
        success: true,
        record_id,
        question,
        answer,
        disclaimer: content::HEALTH_DISCLAIMER,
    }))
}

#[cfg(test)]
mod tests {
    use crate::store::{ActivityStore, Page};
    use crate::test_support::{bearer, signed_in, test_config};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_track_wellness_half_targets() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "well@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/track-wellness")
            .insert_header(bearer(&token))
            .set_json(json!({ "sleep_hours": 4, "exercise_minutes": 15, "water_glasses": 4 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["wellness_score"], 50);
        assert_eq!(body["breakdown"]["sleep_score"], 50.0);
        assert_eq!(body["breakdown"]["exercise_score"], 50.0);
        assert_eq!(body["breakdown"]["water_score"], 50.0);

        let rows = store.health_records(user_id, Page::all()).await.unwrap();
        assert_eq!(rows[0].score, Some(50));
    }

    #[actix_web::test]
    async fn test_non_numeric_sleep_hours_is_400() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "well@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/track-wellness")
            .insert_header(bearer(&token))
            .set_json(json!({ "sleep_hours": "eight" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());

        assert!(store.health_records(user_id, Page::all()).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_negative_measurement_is_400() {
        let (app, store) = test_app!(test_config());
        let (_, token) = signed_in(&store, "well@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/track-wellness")
            .insert_header(bearer(&token))
            .set_json(json!({ "sleep_hours": -1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_analyze_mental_health() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "mood@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/analyze-mental-health")
            .insert_header(bearer(&token))
            .set_json(json!({ "mood_text": "I feel sad and tired today" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["sentiment"], "NEGATIVE");
        let mood = body["mood_score"].as_i64().unwrap();
        assert!((0..25).contains(&mood));

        let rows = store.health_records(user_id, Page::all()).await.unwrap();
        assert_eq!(rows[0].payload["mood_text"], "I feel sad and tired today");
    }

    #[actix_web::test]
    async fn test_health_question_is_unscored() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "q@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/health-question")
            .insert_header(bearer(&token))
            .set_json(json!({ "question": "How much sleep do I need?" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let rows = store.health_records(user_id, Page::all()).await.unwrap();
        assert_eq!(rows[0].score, None);
    }
}

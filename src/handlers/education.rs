use actix_web::{web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::activity::{LearningKind, Level, NewLearningActivity, NewRecord};
use crate::scoring::learning;
use crate::services::content;
use crate::store::ActivityStore;
use crate::utils::session::Session;
use crate::utils::validation::{parse_level, required_text, validate_payload};

#[derive(Deserialize, Validate)]
pub struct LearningPathRequest {
    #[validate(required(message = "Topic is required"))]
    #[validate(length(min = 1, max = 255, message = "Topic must be between 1 and 255 characters"))]
    topic: Option<String>,

    level: Option<String>,
}

#[derive(Serialize)]
pub struct LearningPathResponse {
    success: bool,
    activity_id: Uuid,
    learning_path: String,
    topic: String,
    level: Level,
}

#[derive(Deserialize, Validate)]
pub struct QuestionRequest {
    #[validate(required(message = "Question is required"))]
    #[validate(length(min = 1, max = 2000, message = "Question must be between 1 and 2000 characters"))]
    pub question: Option<String>,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    success: bool,
    activity_id: Uuid,
    question: String,
    answer: String,
    confidence: i32,
}

// POST /api/generate-learning-path
pub async fn generate_learning_path(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<LearningPathRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let topic = required_text(&payload.topic, "Topic")?.to_string();
    let level = parse_level(payload.level.as_deref())?;

    let learning_path = content::learning_path(&topic, level);
    let activity_id = store
        .insert(NewRecord::Learning(NewLearningActivity {
            user_id: user.user_id,
            kind: LearningKind::LearningPath,
            topic: topic.clone(),
            level: Some(level),
            content: learning_path.clone(),
            confidence: learning::confidence(LearningKind::LearningPath, &config.scoring.learning),
        }))
        .await?;

    info!("Stored learning path {} for user {}", activity_id, user.user_id);

    Ok(HttpResponse::Ok().json(LearningPathResponse {
        success: true,
        activity_id,
        learning_path,
        topic,
        level,
    }))
}

// POST /api/answer-question
pub async fn answer_question(
    session: Session,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
    payload: web::Json<QuestionRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let user = session.user(store.get_ref()).await?;
    let question = required_text(&payload.question, "Question")?.to_string();

    let answer = content::answer(&question);
    let confidence = learning::confidence(LearningKind::Question, &config.scoring.learning);
    let activity_id = store
        .insert(NewRecord::Learning(NewLearningActivity {
            user_id: user.user_id,
            kind: LearningKind::Question,
            topic: question.clone(),
            level: None,
            content: answer.clone(),
            confidence,
        }))
        .await?;

    info!("Stored answer {} for user {}", activity_id, user.user_id);

    Ok(HttpResponse::Ok().json(AnswerResponse {
        success: true,
        activity_id,
        question,
        answer,
        confidence,
    }))
}

#[cfg(test)]
mod tests {
    use crate::store::{ActivityStore, Page};
    use crate::test_support::{bearer, signed_in, test_config};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_generate_learning_path_stores_activity() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "learner@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/generate-learning-path")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Rust", "level": "intermediate" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["level"], "intermediate");

        let rows = store.learning_activities(user_id, Page::all()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].topic, "Rust");
    }

    #[actix_web::test]
    async fn test_missing_topic_is_rejected() {
        let (app, store) = test_app!(test_config());
        let (_, token) = signed_in(&store, "learner@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/generate-learning-path")
            .insert_header(bearer(&token))
            .set_json(json!({ "level": "beginner" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Topic is required"));
    }

    #[actix_web::test]
    async fn test_answer_question_records_confidence() {
        let (app, store) = test_app!(test_config());
        let (user_id, token) = signed_in(&store, "learner@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/answer-question")
            .insert_header(bearer(&token))
            .set_json(json!({ "question": "What is photosynthesis?" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["confidence"], 85);

        let rows = store.learning_activities(user_id, Page::all()).await.unwrap();
        assert_eq!(rows[0].confidence, 85);
    }

    #[actix_web::test]
    async fn test_requires_bearer_token() {
        let (app, _store) = test_app!(test_config());

        let req = test::TestRequest::post()
            .uri("/api/answer-question")
            .insert_header(bearer("garbage"))
            .set_json(json!({ "question": "anything" }))
            .to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

use actix_web::rt::task::spawn_blocking;
use actix_web::{web, HttpResponse};
use bcrypt::{hash, verify};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::store::ActivityStore;
use crate::utils::jwt::generate_token;
use crate::utils::validation::validate_payload;

const BCRYPT_COST: u32 = 10;

#[derive(Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 64, message = "Password must be between 8 and 64 characters"))]
    password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    message: &'static str,
    token: String,
    user_id: Uuid,
}

#[derive(Serialize)]
pub struct LoginResponse {
    message: &'static str,
    token: String,
    user_id: Uuid,
    is_premium: bool,
}

fn issue_token(user_id: Uuid, email: &str, config: &AppConfig) -> Result<String, AppError> {
    generate_token(user_id, email, &config.jwt_secret, config.token_ttl_days)
        .map_err(|_| AppError::InternalServerError("Token generation failed".to_string()))
}

// POST /api/register
pub async fn register(
    req: web::Json<AuthRequest>,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let AuthRequest { email, password } = req.into_inner();

    let password_hash = spawn_blocking(move || hash(&password, BCRYPT_COST))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let user = store
        .create_user(&email, &password_hash)
        .await?
        .ok_or_else(|| AppError::Conflict("User already exists".to_string()))?;

    let token = issue_token(user.user_id, &user.email, &config)?;
    info!("Registered user {}", user.user_id);

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully",
        token,
        user_id: user.user_id,
    }))
}

// POST /api/login
pub async fn login(
    req: web::Json<AuthRequest>,
    store: web::Data<dyn ActivityStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let AuthRequest { email, password } = req.into_inner();

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let stored_hash = user.password.clone();
    let is_valid = spawn_blocking(move || verify(password.as_str(), &stored_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(user.user_id, &user.email, &config)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        token,
        user_id: user.user_id,
        is_premium: user.is_premium,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_config;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_register_then_login() {
        let (app, _store) = test_app!(test_config());

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "new@example.com", "password": "correct-horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["token"].as_str().is_some());

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "new@example.com", "password": "correct-horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "new@example.com", "password": "correct-horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["is_premium"], false);
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password() {
        let (app, _store) = test_app!(test_config());

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "pw@example.com", "password": "correct-horse" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "pw@example.com", "password": "battery-staple" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[actix_web::test]
    async fn test_register_rejects_bad_email() {
        let (app, _store) = test_app!(test_config());

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "not-an-email", "password": "correct-horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

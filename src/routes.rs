use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::handlers;
use crate::utils::jwt::validator;
use crate::utils::validation::{json_error_handler, path_error_handler, query_error_handler};

/// Registers every route. Expects `web::Data<dyn ActivityStore>` and
/// `web::Data<AppConfig>` to be provided by the enclosing `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Authentication middleware
    let auth = HttpAuthentication::bearer(validator);

    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::resource("/api/status")
                .route(web::get().to(handlers::status::api_status)),
        )
        .service(
            web::resource("/api/register")
                .route(web::post().to(handlers::auth::register)),
        )
        .service(
            web::resource("/api/login")
                .route(web::post().to(handlers::auth::login)),
        )
        .service(
            web::resource("/api/generate-learning-path")
                .wrap(auth.clone())
                .route(web::post().to(handlers::education::generate_learning_path)),
        )
        .service(
            web::resource("/api/answer-question")
                .wrap(auth.clone())
                .route(web::post().to(handlers::education::answer_question)),
        )
        .service(
            web::resource("/api/analyze-mental-health")
                .wrap(auth.clone())
                .route(web::post().to(handlers::health::analyze_mental_health)),
        )
        .service(
            web::resource("/api/track-wellness")
                .wrap(auth.clone())
                .route(web::post().to(handlers::health::track_wellness)),
        )
        .service(
            web::resource("/api/health-question")
                .wrap(auth.clone())
                .route(web::post().to(handlers::health::health_question)),
        )
        .service(
            web::resource("/api/generate-meal-plan")
                .wrap(auth.clone())
                .route(web::post().to(handlers::nutrition::generate_meal_plan)),
        )
        .service(
            web::resource("/api/reduce-food-waste")
                .wrap(auth.clone())
                .route(web::post().to(handlers::nutrition::reduce_food_waste)),
        )
        .service(
            web::resource("/api/nutrition-advice")
                .wrap(auth.clone())
                .route(web::post().to(handlers::nutrition::nutrition_advice)),
        )
        .service(
            web::resource("/api/user-dashboard")
                .wrap(auth.clone())
                .route(web::get().to(handlers::dashboard::user_dashboard)),
        )
        .service(
            web::resource("/api/user-history/{category}")
                .wrap(auth)
                .route(web::get().to(handlers::dashboard::user_history)),
        );
}

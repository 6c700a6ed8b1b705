use actix_web::HttpResponse;
use serde_json::json;

// GET /api/status
pub async fn api_status() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "online",
        "message": "EmpowerHub API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "sdgs_supported": ["SDG 2: Zero Hunger", "SDG 3: Good Health", "SDG 4: Quality Education"]
    }))
}

//! Shared fixtures for handler tests.

use uuid::Uuid;

use crate::config::AppConfig;
use crate::store::{ActivityStore, MemoryStore};
use crate::utils::jwt::generate_token;

/// Builds the full application on a fresh memory store.
/// Evaluates to `(service, Arc<MemoryStore>)`.
macro_rules! test_app {
    ($config:expr) => {{
        let store = std::sync::Arc::new(crate::store::MemoryStore::new());
        let shared: std::sync::Arc<dyn crate::store::ActivityStore> = store.clone();
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(shared))
                .app_data(actix_web::web::Data::new($config))
                .configure(crate::routes::configure),
        )
        .await;
        (app, store)
    }};
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: "test-secret".to_string(),
        workers: 1,
        ..AppConfig::default()
    }
}

/// Creates a user directly in the store and returns its id and a bearer token.
pub async fn signed_in(store: &MemoryStore, email: &str) -> (Uuid, String) {
    let config = test_config();
    let user = store.create_user(email, "not-a-real-hash").await.unwrap().unwrap();
    let token = generate_token(user.user_id, email, &config.jwt_secret, 1).unwrap();
    (user.user_id, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

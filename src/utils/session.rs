use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::store::ActivityStore;
use crate::utils::jwt::Claims;

/// The authenticated caller of a request.
///
/// Only exists for requests whose bearer token passed the auth middleware,
/// so handlers never look up a "current user" anywhere else.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

impl Session {
    /// Loads the caller's account. A token stays valid after its user is gone,
    /// so anything that writes on the caller's behalf resolves it first.
    pub async fn user(&self, store: &dyn ActivityStore) -> Result<User, AppError> {
        store.find_user(self.user_id).await?.ok_or_else(|| {
            log::warn!("Token for {} refers to missing user {}", self.email, self.user_id);
            AppError::NotFound("User not found".to_string())
        })
    }
}

impl TryFrom<&Claims> for Session {
    type Error = AppError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token is invalid".to_string()))?;
        Ok(Session { user_id, email: claims.email.clone() })
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<Claims>()
            .ok_or_else(|| AppError::Unauthorized("Token is missing".to_string()))
            .and_then(|claims| Session::try_from(claims));
        ready(session)
    }
}

pub mod auth;
pub mod dashboard;
pub mod education;
pub mod health;
pub mod nutrition;
pub mod status;

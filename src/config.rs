//! Runtime configuration, read from the environment (and `.env`).

use std::env;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

use crate::scoring::ScoringConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set and non-empty")]
    MissingJwtSecret,
    #[error("invalid scoring configuration: {0}")]
    Scoring(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Env: `BIND_ADDRESS`, default `127.0.0.1:8080`.
    pub bind_address: String,
    /// Env: `DATABASE_URL`. Without it the server runs on the memory store.
    pub database_url: Option<String>,
    /// Env: `JWT_SECRET`, required.
    pub jwt_secret: String,
    /// Env: `TOKEN_TTL_DAYS`, default 30.
    pub token_ttl_days: i64,
    /// Env: `WORKERS`, default one per CPU.
    pub workers: usize,
    /// Env: `DASHBOARD_RECENT_LIMIT`, default 5.
    pub recent_limit: usize,
    /// Env: `HISTORY_DEFAULT_LIMIT`, default 20.
    pub history_default_limit: i64,
    /// Env: `HISTORY_MAX_LIMIT`, default 100.
    pub history_max_limit: i64,
    /// Env: `SCORING_CONFIG`, optional path to a JSON override file.
    pub scoring: ScoringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            database_url: None,
            jwt_secret: String::new(),
            token_ttl_days: 30,
            workers: num_cpus::get(),
            recent_limit: 5,
            history_default_limit: 20,
            history_max_limit: 100,
            scoring: ScoringConfig::default(),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using default: {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
        if database_url.is_none() {
            warn!("DATABASE_URL not set, records are kept in memory and lost on restart");
        }

        let scoring = match env::var("SCORING_CONFIG") {
            Ok(path) => {
                info!("Loading scoring configuration from {}", path);
                ScoringConfig::from_file(Path::new(&path)).map_err(ConfigError::Scoring)?
            }
            Err(_) => defaults.scoring.clone(),
        };

        let history_max_limit = parse_or("HISTORY_MAX_LIMIT", defaults.history_max_limit).max(1);

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            database_url,
            jwt_secret,
            token_ttl_days: parse_or("TOKEN_TTL_DAYS", defaults.token_ttl_days).max(1),
            workers: parse_or("WORKERS", defaults.workers).max(1),
            recent_limit: parse_or("DASHBOARD_RECENT_LIMIT", defaults.recent_limit),
            history_default_limit: parse_or("HISTORY_DEFAULT_LIMIT", defaults.history_default_limit)
                .clamp(1, history_max_limit),
            history_max_limit,
            scoring,
        })
    }
}

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::HttpRequest;
use validator::Validate;

use crate::errors::AppError;
use crate::models::activity::Level;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

pub fn parse_level(level: Option<&str>) -> Result<Level, AppError> {
    match level {
        None => Ok(Level::default()),
        Some(raw) => raw.trim().to_lowercase().parse().map_err(|_| {
            AppError::BadRequest("Level must be one of beginner, intermediate or advanced".to_string())
        }),
    }
}

/// Returns the trimmed value of a required text field.
pub fn required_text<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::BadRequest(format!("{} is required", field))),
    }
}

/// Splits a comma-separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn require_list(raw: &str, field: &str) -> Result<Vec<String>, AppError> {
    let items = split_list(raw);
    if items.is_empty() {
        return Err(AppError::BadRequest(format!("{} are required", field)));
    }
    Ok(items)
}

// Extractor failures (malformed JSON, non-numeric fields) become 400 {"error": ...}
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

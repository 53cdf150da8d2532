use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use serde_json::json;

/// One entry of a 422 validation detail list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn missing(location: &str, field: &str) -> Self {
        FieldError {
            loc: vec![location.to_string(), field.to_string()],
            msg: "field required".to_string(),
            kind: "value_error.missing".to_string(),
        }
    }

    pub fn scheme_not_permitted(location: &str, field: &str) -> Self {
        FieldError {
            loc: vec![location.to_string(), field.to_string()],
            msg: "URL scheme not permitted".to_string(),
            kind: "value_error.url.scheme".to_string(),
        }
    }

    pub fn not_positive(location: &str, field: &str) -> Self {
        FieldError {
            loc: vec![location.to_string(), field.to_string()],
            msg: "ensure this value is greater than 0".to_string(),
            kind: "value_error.number.not_gt".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Summary not found")]
    NotFound,

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Summary not found" })),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": errors })),
            )
                .into_response(),
            AppError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
            AppError::FetchError(msg) | AppError::ConfigError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": msg })),
            )
                .into_response(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

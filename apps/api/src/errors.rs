use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::logs::viewer::LogQueryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The wire shape is a flat `{"error": "..."}` object on every failure path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Screenshot error: {0}")]
    Screenshot(String),

    #[error("Log query error: {0}")]
    LogQuery(#[from] LogQueryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI request failed".to_string(),
                )
            }
            AppError::Screenshot(detail) => {
                tracing::error!("Screenshot error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate screenshot".to_string(),
                )
            }
            AppError::LogQuery(e) => {
                tracing::error!("Log query error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

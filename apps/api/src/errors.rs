use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No API key configured for this interview")]
    MissingCredential,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingCredential => (
                StatusCode::PRECONDITION_REQUIRED,
                "MISSING_CREDENTIAL",
                "Please provide your Google API key to start the interview".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                match e {
                    LlmError::Auth(_) => (
                        StatusCode::BAD_GATEWAY,
                        "LLM_AUTH_ERROR",
                        "The model provider rejected the API key".to_string(),
                    ),
                    LlmError::RateLimited(_) => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "LLM_RATE_LIMITED",
                        "The model provider is rate limiting requests, try again shortly"
                            .to_string(),
                    ),
                    LlmError::Transport(_) => (
                        StatusCode::BAD_GATEWAY,
                        "LLM_TRANSPORT_ERROR",
                        "Could not reach the model provider".to_string(),
                    ),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "LLM_ERROR",
                        "An AI processing error occurred".to_string(),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

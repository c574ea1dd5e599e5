use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::questions::render::RenderError;

/// Message shown when the model reply cannot be turned into a question set.
pub const RENDER_FAILURE_MESSAGE: &str = "Error parsing the response. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is terminal for the submission that produced it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document read error: {0}")]
    DocumentRead(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DocumentRead(msg) => {
                tracing::warn!("Document read error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_READ_ERROR",
                    "The uploaded resume could not be read. Please upload a valid PDF.".to_string(),
                )
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Rejected oversized form: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    "The form exceeds the 10 MiB upload limit. Please upload a smaller resume."
                        .to_string(),
                )
            }
            AppError::ServiceUnavailable(e) => {
                tracing::error!("Generation service error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SERVICE_UNAVAILABLE",
                    "The question generation service is unavailable. Please try again later."
                        .to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RENDER_ERROR",
                    RENDER_FAILURE_MESSAGE.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

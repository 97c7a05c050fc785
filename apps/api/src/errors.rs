use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::extraction::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassifyError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidRole(role) => (
                StatusCode::BAD_REQUEST,
                "INVALID_ROLE",
                format!("Invalid role: {role}"),
            ),
            AppError::UnsupportedFile(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FILE",
                "Only PDF files are supported".to_string(),
            ),
            AppError::Extraction(ExtractError::Format(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_DOCUMENT",
                format!("Could not read PDF: {msg}"),
            ),
            AppError::Extraction(e @ ExtractError::Io { .. }) => {
                tracing::error!("Upload I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_IO_ERROR",
                    "Failed to read the uploaded file".to_string(),
                )
            }
            AppError::Classification(ClassifyError::EmptyInput) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "No skills provided".to_string(),
            ),
            AppError::Classification(ClassifyError::Model(msg)) => {
                tracing::error!("Classifier error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CLASSIFIER_ERROR",
                    "Domain prediction failed".to_string(),
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

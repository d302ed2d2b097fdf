use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::exchange::ExchangeError;
use crate::feedback::FeedbackError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant maps to one fixed user-facing message; details only go to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Analysis produced no result")]
    NoResult,

    #[error("Feedback delivery failed: {0}")]
    FeedbackFailed(String),
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::MissingCredential => AppError::Configuration(err.to_string()),
            ExchangeError::Request(_) | ExchangeError::InvalidResponse(_) => {
                AppError::AnalysisFailed(err.to_string())
            }
        }
    }
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::NotConfigured => AppError::Configuration(err.to_string()),
            FeedbackError::Invalid(msg) => AppError::Validation(msg),
            FeedbackError::Http(_) | FeedbackError::Rejected { .. } => {
                AppError::FeedbackFailed(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    "The service is not configured. Please contact the administrator.".to_string(),
                )
            }
            AppError::AnalysisFailed(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_FAILED",
                    "The analysis request failed. Please try again.".to_string(),
                )
            }
            AppError::NoResult => {
                tracing::warn!("Analysis returned no content");
                (
                    StatusCode::BAD_GATEWAY,
                    "NO_RESULT",
                    "Could not generate analysis. Please try again.".to_string(),
                )
            }
            AppError::FeedbackFailed(msg) => {
                tracing::error!("Feedback error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "FEEDBACK_FAILED",
                    "Your feedback could not be delivered. Please try again.".to_string(),
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

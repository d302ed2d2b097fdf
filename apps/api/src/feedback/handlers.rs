//! Axum route handlers for the Feedback API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::feedback::{FeedbackSubmission, RelayPayload};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
}

/// POST /api/v1/feedback
///
/// Validates and relays a rating. Relay failures surface as errors.
pub async fn handle_feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(submission) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    submission.validate()?;

    let payload = RelayPayload::from_submission(&submission, Utc::now());
    state.feedback.submit(&payload).await?;

    Ok(Json(FeedbackResponse { status: "received" }))
}

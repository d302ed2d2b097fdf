//! Axum route handlers for the Insights API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::dashboard::DashboardSummary;
use crate::errors::AppError;
use crate::models::insights::Insights;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub analysis_id: Uuid,
    pub insights: Insights,
    pub summary: DashboardSummary,
}

/// POST /api/v1/insights
///
/// Runs one analysis for the submitted profile and returns it together with
/// the derived dashboard figures. Nothing is stored.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<InsightsResponse>, AppError> {
    let Json(profile) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    if profile.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }

    let analysis_id = Uuid::new_v4();
    let insights = state
        .exchange
        .analyze(&profile)
        .instrument(info_span!("analysis", %analysis_id))
        .await?
        .ok_or(AppError::NoResult)?;

    let summary = DashboardSummary::build(&profile, &insights);
    info!(
        "Analysis {analysis_id} served: growth {:.1}%",
        summary.growth_percentage
    );

    Ok(Json(InsightsResponse {
        analysis_id,
        insights,
        summary,
    }))
}

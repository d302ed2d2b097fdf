pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::exchange::handlers as insights;
use crate::feedback::handlers as feedback;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/insights", post(insights::handle_analyze))
        .route("/api/v1/feedback", post(feedback::handle_feedback))
        .fallback(not_found)
        .with_state(state)
}

use std::sync::Arc;

use crate::exchange::InsightsExchange;
use crate::feedback::FeedbackSink;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable state; every request is independent.
#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<InsightsExchange>,
    /// Pluggable feedback destination. Default: FormRelay.
    pub feedback: Arc<dyn FeedbackSink>,
}

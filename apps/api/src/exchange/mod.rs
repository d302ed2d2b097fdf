// Profile-to-insights exchange.
// Implements: prompt selection, response schema, the single model call, validation.
// All model calls go through llm_client; no direct HTTP calls here.

pub mod adapter;
pub mod handlers;
pub mod prompts;
pub mod schema;

pub use adapter::{ExchangeConfig, ExchangeError, InsightsExchange};

mod config;
mod dashboard;
mod errors;
mod exchange;
mod feedback;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::exchange::InsightsExchange;
use crate::feedback::FormRelay;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Payscope API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and the insights exchange
    let llm = LlmClient::new(config.gemini_api_url.clone());
    let exchange = InsightsExchange::new(config.exchange_config(), Arc::new(llm));
    if exchange.is_configured() {
        info!("Insights exchange ready (model: {})", llm_client::MODEL);
    } else {
        warn!("GEMINI_API_KEY is not set; analysis requests will fail until it is configured");
    }

    // Initialize feedback relay
    if config.feedback_relay_url.is_none() {
        warn!("FEEDBACK_RELAY_URL is not set; feedback submissions will be rejected");
    }
    let feedback = FormRelay::new(config.feedback_relay_url.clone());

    // Build app state
    let state = AppState {
        exchange: Arc::new(exchange),
        feedback: Arc::new(feedback),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

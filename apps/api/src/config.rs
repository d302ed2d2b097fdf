use anyhow::{Context, Result};

use crate::exchange::ExchangeConfig;
use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
///
/// The model credential is optional here: a server without it still starts,
/// and every analysis request fails with a configuration error instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub feedback_relay_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            gemini_api_key: optional("GEMINI_API_KEY").or_else(|| optional("API_KEY")),
            gemini_api_url: optional("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            feedback_relay_url: optional("FEEDBACK_RELAY_URL"),
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn exchange_config(&self) -> ExchangeConfig {
        ExchangeConfig {
            api_key: self.gemini_api_key.clone(),
        }
    }
}

//! Feedback relay: forwards user ratings to a third-party form-relay endpoint.
//!
//! Independent of the insights exchange. A failed delivery is reported to the
//! caller; it is never turned into a success.

pub mod handlers;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;
const MAX_MESSAGE_CHARS: usize = 2000;
const RELAY_SUBJECT: &str = "Payscope feedback";

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback relay URL is not configured")]
    NotConfigured,

    #[error("{0}")]
    Invalid(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relay rejected submission (status {status})")]
    Rejected { status: u16 },
}

/// Feedback as posted by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackSubmission {
    pub rating: u8,
    pub message: String,
    pub page: Option<String>,
}

impl FeedbackSubmission {
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(FeedbackError::Invalid(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(FeedbackError::Invalid("message cannot be empty".to_string()));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(FeedbackError::Invalid(format!(
                "message cannot exceed {MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Body forwarded to the relay.
#[derive(Debug, Clone, Serialize)]
pub struct RelayPayload {
    #[serde(rename = "_subject")]
    pub subject: &'static str,
    pub rating: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl RelayPayload {
    pub fn from_submission(submission: &FeedbackSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            subject: RELAY_SUBJECT,
            rating: submission.rating,
            message: submission.message.trim().to_string(),
            page: submission.page.clone(),
            submitted_at,
        }
    }
}

/// Where feedback goes. Carried in `AppState` as `Arc<dyn FeedbackSink>`.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn submit(&self, payload: &RelayPayload) -> Result<(), FeedbackError>;
}

/// Posts feedback as JSON to a form-relay URL. One request, no retries.
pub struct FormRelay {
    client: Client,
    relay_url: Option<String>,
}

impl FormRelay {
    pub fn new(relay_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            relay_url,
        }
    }
}

#[async_trait]
impl FeedbackSink for FormRelay {
    async fn submit(&self, payload: &RelayPayload) -> Result<(), FeedbackError> {
        let url = self.relay_url.as_deref().ok_or(FeedbackError::NotConfigured)?;

        let response = self
            .client
            .post(url)
            .header("accept", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedbackError::Rejected {
                status: status.as_u16(),
            });
        }

        info!("Feedback relayed (rating {})", payload.rating);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::Router;
    use chrono::TimeZone;

    fn submission(rating: u8, message: &str) -> FeedbackSubmission {
        FeedbackSubmission {
            rating,
            message: message.to_string(),
            page: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(submission(4, "Very useful").validate().is_ok());
    }

    #[test]
    fn test_rating_out_of_range_fails() {
        assert!(matches!(
            submission(0, "x").validate(),
            Err(FeedbackError::Invalid(_))
        ));
        assert!(submission(6, "x").validate().is_err());
    }

    #[test]
    fn test_blank_message_fails() {
        assert!(submission(3, "   ").validate().is_err());
    }

    #[test]
    fn test_overlong_message_fails() {
        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(submission(3, &long).validate().is_err());
    }

    #[test]
    fn test_payload_serialization() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let payload = RelayPayload::from_submission(&submission(5, "  Great  "), at);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["_subject"], RELAY_SUBJECT);
        assert_eq!(json["rating"], 5);
        assert_eq!(json["message"], "Great");
        assert!(json.get("page").is_none());
        assert_eq!(json["submitted_at"], "2026-10-19T09:30:00Z");
    }

    /// Relay stand-in answering every request with `status`; records bodies.
    async fn spawn_relay(status: StatusCode) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let recorder = received.clone();
        let router = Router::new().fallback(move |body: String| {
            let recorder = recorder.clone();
            async move {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
                    recorder.lock().unwrap().push(value);
                }
                status
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/relay"), received)
    }

    #[tokio::test]
    async fn test_form_relay_posts_payload() {
        let (url, received) = spawn_relay(StatusCode::OK).await;
        let relay = FormRelay::new(Some(url));
        let payload = RelayPayload::from_submission(&submission(4, "Helpful"), Utc::now());

        relay.submit(&payload).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["rating"], 4);
        assert_eq!(received[0]["message"], "Helpful");
        assert_eq!(received[0]["_subject"], RELAY_SUBJECT);
    }

    #[tokio::test]
    async fn test_form_relay_error_status_is_rejected() {
        let (url, received) = spawn_relay(StatusCode::INTERNAL_SERVER_ERROR).await;
        let relay = FormRelay::new(Some(url));
        let payload = RelayPayload::from_submission(&submission(2, "Broken"), Utc::now());

        assert!(matches!(
            relay.submit(&payload).await,
            Err(FeedbackError::Rejected { status: 500 })
        ));
        assert_eq!(received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_form_relay_without_url_is_not_configured() {
        let relay = FormRelay::new(None);
        let payload = RelayPayload::from_submission(&submission(5, "hi"), Utc::now());
        assert!(matches!(
            relay.submit(&payload).await,
            Err(FeedbackError::NotConfigured)
        ));
    }
}

//! Insights exchange: turns one Profile into one validated Insights with a
//! single structured-output call.
//!
//! Flow: check credential → pick subject variant → render prompt → attach
//! schema → one transport call → strip fences → parse → validate.
//!
//! No retries, no caching. An empty reply is `Ok(None)`, not an error.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::exchange::prompts::{
    ANALYSIS_SYSTEM, ENTRY_LEVEL_PROMPT_TEMPLATE, EXPERIENCED_PROMPT_TEMPLATE, NOT_PROVIDED,
};
use crate::exchange::schema::{insights_response_schema, SCHEMA_NAME};
use crate::llm_client::prompts::{FIGURES_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, GenerationRequest, GenerationTransport, LlmError};
use crate::models::insights::Insights;
use crate::models::profile::{
    normalize_amount, CompensationTotals, EntryLevelDetails, ExperiencedPay, Profile,
};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("analysis service credential is not configured")]
    MissingCredential,

    #[error("analysis request failed: {0}")]
    Request(#[from] LlmError),

    #[error("invalid analysis response: {0}")]
    InvalidResponse(String),
}

/// Settings the exchange needs at call time. Built once from `Config`.
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfig {
    pub api_key: Option<String>,
}

impl ExchangeConfig {
    fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Subject variants
// ────────────────────────────────────────────────────────────────────────────

/// The active half of a Profile, paired with its prompt template.
#[derive(Debug)]
pub enum AnalysisSubject<'a> {
    Experienced {
        profile: &'a Profile,
        pay: &'a ExperiencedPay,
        totals: CompensationTotals,
    },
    EntryLevel {
        profile: &'a Profile,
        details: &'a EntryLevelDetails,
    },
}

impl<'a> AnalysisSubject<'a> {
    pub fn from_profile(profile: &'a Profile) -> Self {
        if profile.entry_level {
            AnalysisSubject::EntryLevel {
                profile,
                details: &profile.entry,
            }
        } else {
            AnalysisSubject::Experienced {
                profile,
                pay: &profile.compensation,
                totals: profile.totals(),
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            AnalysisSubject::Experienced { .. } => "experienced",
            AnalysisSubject::EntryLevel { .. } => "entry_level",
        }
    }

    pub fn render_prompt(&self) -> String {
        match self {
            AnalysisSubject::Experienced {
                profile,
                pay,
                totals,
            } => {
                let mut values = identity_values(profile);
                values.extend([
                    ("monthly_base", format_amount(pay.monthly_base)),
                    ("monthly_incentive", format_amount(pay.monthly_incentive)),
                    ("monthly_overtime", format_amount(pay.monthly_overtime)),
                    ("monthly_total", format_amount(totals.monthly)),
                    ("profit_share", format_amount(pay.annual_profit_share)),
                    ("festival_bonus", format_amount(pay.festival_bonus)),
                    ("provident_fund", format_amount(pay.provident_fund)),
                    ("gratuity", format_amount(pay.gratuity)),
                    ("annual_total", format_amount(totals.annual)),
                ]);
                render_template(EXPERIENCED_PROMPT_TEMPLATE, &values)
            }
            AnalysisSubject::EntryLevel { profile, details } => {
                let expected = details
                    .expected_monthly_salary
                    .map(format_amount)
                    .unwrap_or_else(|| NOT_PROVIDED.to_string());
                let skills = details.skill_list();
                let skills = if skills.is_empty() {
                    NOT_PROVIDED.to_string()
                } else {
                    skills.join(", ")
                };

                let mut values = identity_values(profile);
                values.extend([
                    ("expected_salary", expected),
                    ("education", or_not_provided(&details.education)),
                    ("projects", or_not_provided(&details.projects)),
                    ("skills", skills),
                ]);
                render_template(ENTRY_LEVEL_PROMPT_TEMPLATE, &values)
            }
        }
    }
}

/// Placeholder values shared by both templates.
fn identity_values(profile: &Profile) -> Vec<(&'static str, String)> {
    let benefits = profile.benefit_labels();
    let benefits = if benefits.is_empty() {
        "none listed".to_string()
    } else {
        benefits.join(", ")
    };

    vec![
        ("role", or_not_provided(&profile.role)),
        ("industry", or_not_provided(&profile.industry)),
        ("location", or_not_provided(&profile.location)),
        ("years", format_amount(profile.years_of_experience)),
        ("currency", profile.currency.code().to_string()),
        ("benefits", benefits),
        ("figures_instruction", FIGURES_INSTRUCTION.to_string()),
    ]
}

/// Fills `{name}` placeholders in one pass. Substituted text is never
/// rescanned, so user input containing braces is inserted verbatim.
fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, value))
        });
        match filled {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn or_not_provided(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders an amount with at most two decimals. Never prints NaN or inf.
fn format_amount(value: f64) -> String {
    let amount = normalize_amount(value);
    let scaled = amount * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        amount
    };
    format!("{rounded}")
}

// ────────────────────────────────────────────────────────────────────────────
// Exchange
// ────────────────────────────────────────────────────────────────────────────

/// The profile-to-insights adapter. Holds its configuration and transport;
/// nothing is read from the environment mid-call.
pub struct InsightsExchange {
    config: ExchangeConfig,
    transport: Arc<dyn GenerationTransport>,
}

impl InsightsExchange {
    pub fn new(config: ExchangeConfig, transport: Arc<dyn GenerationTransport>) -> Self {
        Self { config, transport }
    }

    pub fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    /// Runs one analysis. Returns `Ok(None)` when the service produced no text.
    pub async fn analyze(&self, profile: &Profile) -> Result<Option<Insights>, ExchangeError> {
        let api_key = self
            .config
            .credential()
            .ok_or(ExchangeError::MissingCredential)?;

        let subject = AnalysisSubject::from_profile(profile);
        let request = build_request(&subject);
        info!(
            "Requesting {} analysis (mode: {}) for role {:?}",
            SCHEMA_NAME,
            subject.mode(),
            profile.role
        );

        let Some(text) = self.transport.generate(api_key, &request).await? else {
            warn!("Analysis service returned no text");
            return Ok(None);
        };

        let insights = parse_insights(&text)?;
        info!(
            "Analysis complete: status={}, next_role={:?}",
            insights.market_analysis.payment_status.label(),
            insights.next_career_move.role
        );
        Ok(Some(insights))
    }
}

/// Builds the outgoing request for a subject.
pub fn build_request(subject: &AnalysisSubject<'_>) -> GenerationRequest {
    GenerationRequest {
        system: format!("{ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}"),
        prompt: subject.render_prompt(),
        response_schema: insights_response_schema(),
    }
}

/// Parses and validates the model's JSON text.
pub fn parse_insights(text: &str) -> Result<Insights, ExchangeError> {
    let text = strip_json_fences(text);
    let insights: Insights = serde_json::from_str(text).map_err(|e| {
        warn!("Analysis response did not match schema: {e}");
        ExchangeError::InvalidResponse(e.to_string())
    })?;
    insights
        .validate()
        .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;
    Ok(insights)
}

// ────────────────────────────────────────────────────────────────────────────
// Test transport
// ────────────────────────────────────────────────────────────────────────────

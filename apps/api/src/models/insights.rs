//! Insights: the structured analysis returned by the model.
//!
//! Field names on the wire are camelCase and match the response schema in
//! `exchange::schema`. Deserializing is not enough to accept a value: call
//! [`Insights::validate`] for the bounds serde cannot express.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightsError {
    #[error("salary range must satisfy 0 <= min <= median <= max (got {min}, {median}, {max})")]
    InvalidRange { min: f64, median: f64, max: f64 },

    #[error("{field} must be between 0 and 100 (got {value})")]
    OutOfBounds { field: &'static str, value: f64 },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// SalaryRange
// ────────────────────────────────────────────────────────────────────────────

/// Annual salary range. Cannot be constructed or deserialized unless
/// `0 <= min <= median <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSalaryRange")]
pub struct SalaryRange {
    min: f64,
    median: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawSalaryRange {
    min: f64,
    median: f64,
    max: f64,
}

impl TryFrom<RawSalaryRange> for SalaryRange {
    type Error = InsightsError;

    fn try_from(raw: RawSalaryRange) -> Result<Self, Self::Error> {
        SalaryRange::new(raw.min, raw.median, raw.max)
    }
}

impl SalaryRange {
    pub fn new(min: f64, median: f64, max: f64) -> Result<Self, InsightsError> {
        let finite = min.is_finite() && median.is_finite() && max.is_finite();
        if !finite || min < 0.0 || min > median || median > max {
            return Err(InsightsError::InvalidRange { min, median, max });
        }
        Ok(Self { min, median, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// How current pay compares with the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Underpaid,
    Fair,
    Overpaid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Underpaid,
        PaymentStatus::Fair,
        PaymentStatus::Overpaid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Underpaid => "Underpaid",
            PaymentStatus::Fair => "Fair",
            PaymentStatus::Overpaid => "Overpaid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub salary_range: SalaryRange,
    pub payment_status: PaymentStatus,
    /// 0 – 100
    pub percentile: f64,
    pub gap_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextCareerMove {
    pub role: String,
    pub timeframe: String,
    /// 0 – 100
    pub probability: f64,
    pub salary_range: SalaryRange,
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_verification_checklist: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Negotiation {
    pub email_script: String,
    pub verbal_script: String,
    pub tips: Vec<String>,
}

/// Full analysis for one submitted profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub market_analysis: MarketAnalysis,
    pub next_career_move: NextCareerMove,
    pub negotiation: Negotiation,
    pub verdict_color: String,
}

impl Insights {
    /// Checks the bounds the schema declares but serde does not enforce.
    /// Salary ranges are already checked during deserialization.
    pub fn validate(&self) -> Result<(), InsightsError> {
        check_score("marketAnalysis.percentile", self.market_analysis.percentile)?;
        check_score(
            "nextCareerMove.probability",
            self.next_career_move.probability,
        )?;

        if self
            .next_career_move
            .required_skills
            .iter()
            .all(|s| s.trim().is_empty())
        {
            return Err(InsightsError::Empty("nextCareerMove.requiredSkills"));
        }

        Ok(())
    }
}

fn check_score(field: &'static str, value: f64) -> Result<(), InsightsError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(InsightsError::OutOfBounds { field, value })
    }
}

//! Profile: the compensation/career record a user submits for benchmarking.
//!
//! Numeric fields come from a web form, so they are parsed leniently: numbers,
//! numeric strings, empty strings and `null` are all accepted. Anything that is
//! missing, non-numeric, non-finite or negative collapses to zero. NaN never
//! leaves this module.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const MONTHS_PER_YEAR: f64 = 12.0;
/// Ceiling for any single amount and for computed totals.
pub const MAX_AMOUNT: f64 = 1e12;

// ────────────────────────────────────────────────────────────────────────────
// Enumerated catalogs
// ────────────────────────────────────────────────────────────────────────────

/// Currencies accepted on the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "BDT")]
    Bdt,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Bdt => "BDT",
            Currency::Inr => "INR",
        }
    }
}

/// Fixed benefit catalog. Stored in a `BTreeSet`, so duplicates collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Benefit {
    #[serde(rename = "Health Insurance")]
    HealthInsurance,
    #[serde(rename = "Life Insurance")]
    LifeInsurance,
    #[serde(rename = "Provident Fund")]
    ProvidentFund,
    #[serde(rename = "Gratuity")]
    Gratuity,
    #[serde(rename = "Transport Allowance")]
    TransportAllowance,
    #[serde(rename = "Meal Allowance")]
    MealAllowance,
    #[serde(rename = "Remote Work")]
    RemoteWork,
    #[serde(rename = "Flexible Hours")]
    FlexibleHours,
    #[serde(rename = "Stock Options")]
    StockOptions,
    #[serde(rename = "Learning Budget")]
    LearningBudget,
    #[serde(rename = "Gym Membership")]
    GymMembership,
    #[serde(rename = "Paid Time Off")]
    PaidTimeOff,
}

impl Benefit {
    pub fn label(&self) -> &'static str {
        match self {
            Benefit::HealthInsurance => "Health Insurance",
            Benefit::LifeInsurance => "Life Insurance",
            Benefit::ProvidentFund => "Provident Fund",
            Benefit::Gratuity => "Gratuity",
            Benefit::TransportAllowance => "Transport Allowance",
            Benefit::MealAllowance => "Meal Allowance",
            Benefit::RemoteWork => "Remote Work",
            Benefit::FlexibleHours => "Flexible Hours",
            Benefit::StockOptions => "Stock Options",
            Benefit::LearningBudget => "Learning Budget",
            Benefit::GymMembership => "Gym Membership",
            Benefit::PaidTimeOff => "Paid Time Off",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile shape
// ────────────────────────────────────────────────────────────────────────────

/// Itemized pay for experienced users. Base, incentive and overtime are
/// monthly; the rest are annual amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperiencedPay {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_base: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_incentive: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_overtime: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub annual_profit_share: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub festival_bonus: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub provident_fund: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub gratuity: f64,
}

/// Expectations and background for users without current compensation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryLevelDetails {
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub expected_monthly_salary: Option<f64>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub projects: String,
    /// Comma-separated, as typed into the form.
    #[serde(default)]
    pub skills: String,
}

impl EntryLevelDetails {
    /// Splits the comma-separated skills text, dropping blanks.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The profile submitted from the benchmarking form.
///
/// Both compensation sub-shapes may be present; `entry_level` decides which one
/// the exchange reads. The other is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub years_of_experience: f64,
    #[serde(default)]
    pub entry_level: bool,
    #[serde(default)]
    pub compensation: ExperiencedPay,
    #[serde(default)]
    pub entry: EntryLevelDetails,
    #[serde(default)]
    pub benefits: BTreeSet<Benefit>,
    #[serde(default)]
    pub currency: Currency,
}

impl Profile {
    /// Normalized totals for the active compensation mode.
    pub fn totals(&self) -> CompensationTotals {
        if self.entry_level {
            let monthly = self
                .entry
                .expected_monthly_salary
                .map(normalize_amount)
                .unwrap_or(0.0);
            CompensationTotals {
                monthly,
                annual: normalize_amount(annualize(monthly)),
            }
        } else {
            let pay = &self.compensation;
            let monthly = normalize_amount(pay.monthly_base)
                + normalize_amount(pay.monthly_incentive)
                + normalize_amount(pay.monthly_overtime);
            let annual_extras = normalize_amount(pay.annual_profit_share)
                + normalize_amount(pay.festival_bonus)
                + normalize_amount(pay.provident_fund)
                + normalize_amount(pay.gratuity);
            CompensationTotals {
                monthly: normalize_amount(monthly),
                annual: normalize_amount(annualize(monthly) + annual_extras),
            }
        }
    }

    pub fn benefit_labels(&self) -> Vec<&'static str> {
        self.benefits.iter().map(Benefit::label).collect()
    }
}

/// Current pay for the active mode. Always finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompensationTotals {
    pub monthly: f64,
    pub annual: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Numeric normalization
// ────────────────────────────────────────────────────────────────────────────

/// `monthly × 12`.
pub fn annualize(monthly: f64) -> f64 {
    monthly * MONTHS_PER_YEAR
}

/// Maps NaN, infinities and negatives to zero and caps at [`MAX_AMOUNT`].
pub fn normalize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_AMOUNT)
    } else {
        0.0
    }
}

fn amount_from_value(value: Option<Value>) -> Option<f64> {
    let raw = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    if raw.is_finite() && raw >= 0.0 {
        Some(raw.min(MAX_AMOUNT))
    } else {
        None
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(amount_from_value(value).unwrap_or(0.0))
}

fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(amount_from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn experienced(pay: serde_json::Value) -> Profile {
        serde_json::from_value(json!({
            "role": "Backend Engineer",
            "industry": "Fintech",
            "location": "Dhaka",
            "years_of_experience": 4.5,
            "entry_level": false,
            "compensation": pay,
            "currency": "BDT"
        }))
        .unwrap()
    }

    #[test]
    fn test_all_absent_compensation_totals_zero() {
        let profile = experienced(json!({}));
        let totals = profile.totals();
        assert_eq!(totals.monthly, 0.0);
        assert_eq!(totals.annual, 0.0);
        assert!(!totals.annual.is_nan());
    }

    #[test]
    fn test_non_numeric_fields_become_zero() {
        let profile = experienced(json!({
            "monthly_base": "abc",
            "monthly_incentive": "",
            "monthly_overtime": null,
            "annual_profit_share": [],
            "festival_bonus": {"x": 1},
            "provident_fund": "-300",
            "gratuity": "NaN"
        }));
        let totals = profile.totals();
        assert_eq!(totals.monthly, 0.0);
        assert_eq!(totals.annual, 0.0);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let profile = experienced(json!({"monthly_base": " 5,000 ", "monthly_overtime": "250.5"}));
        assert_eq!(profile.compensation.monthly_base, 5000.0);
        assert_eq!(profile.compensation.monthly_overtime, 250.5);
    }

    #[test]
    fn test_monthly_base_annualizes_exactly() {
        let profile = experienced(json!({"monthly_base": 5000}));
        assert_eq!(profile.totals().annual, 60000.0);
    }

    #[test]
    fn test_huge_amounts_are_capped_and_totals_stay_finite() {
        let profile = experienced(json!({
            "monthly_base": 1e308,
            "monthly_incentive": "1e308",
            "gratuity": 1e308
        }));
        assert_eq!(profile.compensation.monthly_base, MAX_AMOUNT);

        let totals = profile.totals();
        assert!(totals.monthly.is_finite());
        assert!(totals.annual.is_finite());
        assert_eq!(totals.monthly, MAX_AMOUNT);
        assert_eq!(totals.annual, MAX_AMOUNT);
    }

    #[test]
    fn test_directly_built_huge_pay_is_capped() {
        let profile = Profile {
            compensation: ExperiencedPay {
                monthly_base: f64::MAX,
                ..Default::default()
            },
            ..Default::default()
        };
        let totals = profile.totals();
        assert_eq!(totals.monthly, MAX_AMOUNT);
        assert!(totals.annual.is_finite());
    }

    #[test]
    fn test_annual_extras_added_once() {
        let profile = experienced(json!({
            "monthly_base": 1000,
            "monthly_incentive": 200,
            "monthly_overtime": 100,
            "annual_profit_share": 500,
            "festival_bonus": 2000,
            "provident_fund": 1200,
            "gratuity": 800
        }));
        let totals = profile.totals();
        assert_eq!(totals.monthly, 1300.0);
        assert_eq!(totals.annual, 1300.0 * 12.0 + 4500.0);
    }

    #[test]
    fn test_entry_level_ignores_itemized_pay() {
        let profile: Profile = serde_json::from_value(json!({
            "role": "Junior Developer",
            "entry_level": true,
            "compensation": {"monthly_base": 9000},
            "entry": {"expected_monthly_salary": "3000", "skills": "Rust, SQL"}
        }))
        .unwrap();
        let totals = profile.totals();
        assert_eq!(totals.monthly, 3000.0);
        assert_eq!(totals.annual, 36000.0);
    }

    #[test]
    fn test_entry_level_without_expectation_is_zero() {
        let profile: Profile = serde_json::from_value(json!({
            "entry_level": true,
            "entry": {"expected_monthly_salary": "not sure"}
        }))
        .unwrap();
        assert_eq!(profile.entry.expected_monthly_salary, None);
        assert_eq!(profile.totals().annual, 0.0);
    }

    #[test]
    fn test_normalize_amount_rejects_non_finite() {
        assert_eq!(normalize_amount(f64::NAN), 0.0);
        assert_eq!(normalize_amount(f64::INFINITY), 0.0);
        assert_eq!(normalize_amount(-5.0), 0.0);
        assert_eq!(normalize_amount(42.0), 42.0);
    }

    #[test]
    fn test_skill_list_splits_and_trims() {
        let entry = EntryLevelDetails {
            skills: " Rust, ,SQL ,Docker,".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.skill_list(), vec!["Rust", "SQL", "Docker"]);
    }

    #[test]
    fn test_benefits_deduplicate() {
        let profile: Profile = serde_json::from_value(json!({
            "benefits": ["Remote Work", "Health Insurance", "Remote Work"]
        }))
        .unwrap();
        assert_eq!(profile.benefits.len(), 2);
        assert_eq!(
            profile.benefit_labels(),
            vec!["Health Insurance", "Remote Work"]
        );
    }

    #[test]
    fn test_unknown_benefit_is_rejected() {
        let result: Result<Profile, _> = serde_json::from_value(json!({
            "benefits": ["Free Yacht"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let profile: Profile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(profile.currency, Currency::Usd);
        assert_eq!(profile.currency.code(), "USD");
    }

    #[test]
    fn test_unsupported_currency_is_rejected() {
        let result: Result<Profile, _> = serde_json::from_value(json!({"currency": "JPY"}));
        assert!(result.is_err());
    }
}

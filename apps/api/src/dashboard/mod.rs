//! Derived view values: the few computations the dashboard needs on top of
//! an analysis. Everything here is a pure function of its inputs.

use serde::Serialize;

use crate::models::insights::Insights;
use crate::models::profile::{normalize_amount, Profile};

const DEFAULT_SYMBOL: &str = "$";

/// Percentage growth from the current annual figure to `target_annual`.
///
/// When `current_annual` is zero (entry-level users, empty forms) the market
/// median stands in as the baseline. If that is zero too the growth is 0.
pub fn growth_percentage(current_annual: f64, target_annual: f64, market_median: f64) -> f64 {
    let current = normalize_amount(current_annual);
    let baseline = if current > 0.0 {
        current
    } else {
        normalize_amount(market_median)
    };

    if baseline == 0.0 {
        return 0.0;
    }
    (normalize_amount(target_annual) - baseline) / baseline * 100.0
}

/// Symbol for a currency code; `$` for anything unrecognized.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "BDT" => "৳",
        "INR" => "₹",
        _ => DEFAULT_SYMBOL,
    }
}

/// Figures the dashboard renders next to the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub currency: &'static str,
    pub currency_symbol: &'static str,
    pub mode: &'static str,
    pub current_monthly: f64,
    pub current_annual: f64,
    pub market_min: f64,
    pub market_median: f64,
    pub market_max: f64,
    pub target_median: f64,
    pub growth_percentage: f64,
}

impl DashboardSummary {
    pub fn build(profile: &Profile, insights: &Insights) -> Self {
        let totals = profile.totals();
        let market = insights.market_analysis.salary_range;
        let market_median = market.median();
        let target_median = insights.next_career_move.salary_range.median();
        let code = profile.currency.code();

        Self {
            currency: code,
            currency_symbol: currency_symbol(code),
            mode: if profile.entry_level {
                "entry_level"
            } else {
                "experienced"
            },
            current_monthly: totals.monthly,
            current_annual: totals.annual,
            market_min: market.min(),
            market_median,
            market_max: market.max(),
            target_median,
            growth_percentage: growth_percentage(totals.annual, target_median, market_median),
        }
    }
}

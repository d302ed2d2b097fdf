// Prompt constants for the profile-to-insights exchange.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the salary analysis.
pub const ANALYSIS_SYSTEM: &str = "You are a senior compensation analyst and career coach \
    with current knowledge of salary markets across industries and regions. \
    You give candid, specific, numbers-first advice.";

/// Prompt for users with current itemized pay.
/// Replace: {role}, {industry}, {location}, {years}, {currency}, {monthly_base},
///          {monthly_incentive}, {monthly_overtime}, {monthly_total}, {profit_share},
///          {festival_bonus}, {provident_fund}, {gratuity}, {annual_total},
///          {benefits}, {figures_instruction}
pub const EXPERIENCED_PROMPT_TEMPLATE: &str = r#"Benchmark the compensation of this professional against the current market.

PROFILE:
- Role: {role}
- Industry: {industry}
- Location: {location}
- Years of experience: {years}
- Currency: {currency}

CURRENT COMPENSATION:
- Monthly base salary: {monthly_base}
- Monthly incentive: {monthly_incentive}
- Monthly overtime: {monthly_overtime}
- Total monthly cash: {monthly_total}
- Annual profit share: {profit_share}
- Festival bonus (annual): {festival_bonus}
- Provident fund (annual): {provident_fund}
- Gratuity (annual): {gratuity}
- Total annual compensation: {annual_total}
- Benefits: {benefits}

TASK:
1. marketAnalysis: estimate the market salary range for this role, industry, location and
   seniority. Classify current pay as Underpaid, Fair or Overpaid, give the user's percentile
   in that market, and explain the gap in gapAnalysis.
2. nextCareerMove: predict the most likely next role, the timeframe to reach it, the
   probability of getting there, its salary range, and the skills required. Include an
   ordered offerVerificationChecklist of things to confirm before accepting an offer.
3. negotiation: write an emailScript and a verbalScript the user can use to ask for a raise,
   grounded in the numbers above, plus short tips.
4. verdictColor: "red" if underpaid, "amber" if roughly fair, "green" if well paid.

{figures_instruction}"#;

/// Prompt for users without current compensation.
/// Replace: {role}, {industry}, {location}, {years}, {currency}, {expected_salary},
///          {education}, {projects}, {skills}, {benefits}, {figures_instruction}
pub const ENTRY_LEVEL_PROMPT_TEMPLATE: &str = r#"Assess the market value of this entry-level candidate.

PROFILE:
- Target role: {role}
- Industry: {industry}
- Location: {location}
- Years of experience: {years}
- Currency: {currency}

CANDIDATE:
- Expected monthly salary: {expected_salary}
- Education: {education}
- Projects / portfolio: {projects}
- Skills: {skills}
- Benefits wanted: {benefits}

TASK:
1. marketAnalysis: estimate the entry-level salary range for this role and location.
   Classify the candidate's expectation as Underpaid (asking below market), Fair or Overpaid
   (asking above market), give the percentile the expectation sits at, and explain in
   gapAnalysis what in the candidate's background supports or weakens it.
2. nextCareerMove: the role the candidate can realistically grow into first, the timeframe,
   the probability, its salary range and the skills still missing. Include an ordered
   offerVerificationChecklist for evaluating a first offer.
3. negotiation: an emailScript and a verbalScript for negotiating a first offer, plus short tips.
4. verdictColor: "red" if the expectation is far off the market, "amber" if slightly off,
   "green" if well aligned.

{figures_instruction}"#;

pub const NOT_PROVIDED: &str = "not provided";

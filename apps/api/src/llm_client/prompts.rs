// Shared prompt fragments. Each feature that calls the model keeps its own
// prompts.rs alongside it; only cross-cutting fragments live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only, \
    conforming exactly to the provided response schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Keeps figures comparable with what the dashboard shows.
pub const FIGURES_INSTRUCTION: &str = "\
    All salary figures you return are ANNUAL amounts in the user's currency. \
    Percentile and probability are numbers from 0 to 100. \
    Every salary range must satisfy min <= median <= max.";

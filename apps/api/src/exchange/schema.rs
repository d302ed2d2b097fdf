//! Response schema for the insights exchange.
//!
//! Declared in the OpenAPI-subset dialect the generation service accepts for
//! `responseSchema` (upper-case type names). Kept separate from the request
//! so the contract can be checked without the network.

use serde_json::{json, Value};

use crate::models::insights::PaymentStatus;

/// Identifier the schema is logged under.
pub const SCHEMA_NAME: &str = "salary_insights";

fn salary_range_schema() -> Value {
    json!({
        "type": "OBJECT",
        "description": "Annual salary range; min <= median <= max",
        "properties": {
            "min": {"type": "NUMBER", "minimum": 0},
            "median": {"type": "NUMBER", "minimum": 0},
            "max": {"type": "NUMBER", "minimum": 0}
        },
        "required": ["min", "median", "max"]
    })
}

fn score_schema(description: &str) -> Value {
    json!({
        "type": "NUMBER",
        "minimum": 0,
        "maximum": 100,
        "description": description
    })
}

fn string_list_schema(min_items: Option<u32>) -> Value {
    let mut schema = json!({
        "type": "ARRAY",
        "items": {"type": "STRING"}
    });
    if let Some(min) = min_items {
        schema["minItems"] = json!(min);
    }
    schema
}

/// The full `Insights` schema sent with every analysis request.
pub fn insights_response_schema() -> Value {
    let payment_statuses: Vec<&str> = PaymentStatus::ALL.iter().map(|s| s.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "marketAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "salaryRange": salary_range_schema(),
                    "paymentStatus": {"type": "STRING", "enum": payment_statuses},
                    "percentile": score_schema("User's percentile in the market, 0-100"),
                    "gapAnalysis": {"type": "STRING"}
                },
                "required": ["salaryRange", "paymentStatus", "percentile", "gapAnalysis"]
            },
            "nextCareerMove": {
                "type": "OBJECT",
                "properties": {
                    "role": {"type": "STRING"},
                    "timeframe": {"type": "STRING"},
                    "probability": score_schema("Likelihood of reaching the role, 0-100"),
                    "salaryRange": salary_range_schema(),
                    "requiredSkills": string_list_schema(Some(1)),
                    "offerVerificationChecklist": string_list_schema(None)
                },
                "required": ["role", "timeframe", "probability", "salaryRange", "requiredSkills"]
            },
            "negotiation": {
                "type": "OBJECT",
                "properties": {
                    "emailScript": {"type": "STRING"},
                    "verbalScript": {"type": "STRING"},
                    "tips": string_list_schema(None)
                },
                "required": ["emailScript", "verbalScript", "tips"]
            },
            "verdictColor": {"type": "STRING"}
        },
        "required": ["marketAnalysis", "nextCareerMove", "negotiation", "verdictColor"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::insights::tests::sample_insights_json;
    use crate::models::insights::Insights;

    /// Walks `value` against `schema`: every required key present, no key the
    /// schema does not declare.
    fn conforms(schema: &Value, value: &Value, path: &str) -> Result<(), String> {
        match schema["type"].as_str() {
            Some("OBJECT") => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| format!("{path}: expected object"))?;
                let props = schema["properties"].as_object().unwrap();
                for req in schema["required"].as_array().unwrap() {
                    let key = req.as_str().unwrap();
                    if !obj.contains_key(key) {
                        return Err(format!("{path}.{key}: missing"));
                    }
                }
                for (key, child) in obj {
                    let child_schema = props
                        .get(key)
                        .ok_or_else(|| format!("{path}.{key}: not in schema"))?;
                    conforms(child_schema, child, &format!("{path}.{key}"))?;
                }
                Ok(())
            }
            Some("ARRAY") => {
                let items = value
                    .as_array()
                    .ok_or_else(|| format!("{path}: expected array"))?;
                for item in items {
                    conforms(&schema["items"], item, path)?;
                }
                Ok(())
            }
            Some("STRING") => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("{path}: expected string"))?;
                if let Some(allowed) = schema["enum"].as_array() {
                    if !allowed.iter().any(|a| a == s) {
                        return Err(format!("{path}: '{s}' not in enum"));
                    }
                }
                Ok(())
            }
            Some("NUMBER") => value
                .as_f64()
                .map(|_| ())
                .ok_or_else(|| format!("{path}: expected number")),
            other => Err(format!("{path}: unexpected schema type {other:?}")),
        }
    }

    #[test]
    fn test_sample_response_conforms_to_schema() {
        let schema = insights_response_schema();
        conforms(&schema, &sample_insights_json(), "$").unwrap();
    }

    #[test]
    fn test_serialized_insights_conform_to_schema() {
        let insights: Insights = serde_json::from_value(sample_insights_json()).unwrap();
        let encoded = serde_json::to_value(&insights).unwrap();
        conforms(&insights_response_schema(), &encoded, "$").unwrap();
    }

    #[test]
    fn test_missing_next_career_move_does_not_conform() {
        let mut body = sample_insights_json();
        body.as_object_mut().unwrap().remove("nextCareerMove");
        let err = conforms(&insights_response_schema(), &body, "$").unwrap_err();
        assert!(err.contains("nextCareerMove"));
    }

    #[test]
    fn test_payment_status_enum_matches_model() {
        let schema = insights_response_schema();
        let declared = schema["properties"]["marketAnalysis"]["properties"]["paymentStatus"]
            ["enum"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(declared, vec!["Underpaid", "Fair", "Overpaid"]);
    }

    #[test]
    fn test_checklist_is_not_required() {
        let schema = insights_response_schema();
        let required = schema["properties"]["nextCareerMove"]["required"]
            .as_array()
            .unwrap();
        assert!(!required.iter().any(|r| r == "offerVerificationChecklist"));
        assert!(required.iter().any(|r| r == "requiredSkills"));
    }

    #[test]
    fn test_required_skills_needs_at_least_one_item() {
        let schema = insights_response_schema();
        assert_eq!(
            schema["properties"]["nextCareerMove"]["properties"]["requiredSkills"]["minItems"],
            1
        );
    }

    #[test]
    fn test_scores_are_bounded() {
        let schema = insights_response_schema();
        let percentile = &schema["properties"]["marketAnalysis"]["properties"]["percentile"];
        assert_eq!(percentile["minimum"], 0);
        assert_eq!(percentile["maximum"], 100);
    }
}

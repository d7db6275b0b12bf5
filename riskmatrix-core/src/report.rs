//! Assessment result assembly and rendering
//!
//! Global invariants enforced:
//! - Results are fresh value objects, never mutated after construction
//! - Rendering is deterministic: identical input yields identical output

use crate::error::EngineError;
use crate::intent::IntentClassificationResult;
use crate::priority::PriorityLevel;
use crate::risk::RiskAssessmentInput;
use crate::scales::{ScaleRegistry, SeverityCategory};
use crate::triggers::WorkflowTriggers;
use serde::{Deserialize, Serialize};

/// Complete outcome of one risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskAssessmentResult {
    pub aggregate_severity: f64,
    pub risk_score: f64,
    pub priority: PriorityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    pub triggers: WorkflowTriggers,
}

/// Render an assessment as aligned text, with per-category tier labels
/// looked up in the registry.
pub fn render_text(
    result: &RiskAssessmentResult,
    input: &RiskAssessmentInput,
    registry: &ScaleRegistry,
) -> Result<String, EngineError> {
    let mut output = String::new();

    output.push_str("Severity:\n");
    for category in SeverityCategory::ALL {
        let raw = input.severity.get(category);
        let tier = registry.tier_for(category, raw)?;
        output.push_str(&format!(
            "  {:<12} {:>3}  ({})\n",
            category.as_str(),
            raw,
            tier.label
        ));
    }

    let likelihood_tier = registry.tier_for_likelihood(input.likelihood)?;
    output.push_str(&format!(
        "  {:<12} {:>3}  ({})\n",
        "likelihood",
        input.likelihood,
        likelihood_tier.label
    ));

    output.push('\n');
    output.push_str(&format!("Aggregate severity: {:.1}\n", result.aggregate_severity));
    output.push_str(&format!("Risk score:         {:.1}\n", result.risk_score));
    output.push_str(&format!("Priority:           {}\n", result.priority.as_str()));
    output.push_str(&format!(
        "Auto-create CAPA:   {}\n",
        if result.triggers.auto_create_capa { "yes" } else { "no" }
    ));
    output.push_str(&format!(
        "Escalate:           {}\n",
        if result.triggers.escalate_notification { "yes" } else { "no" }
    ));

    if let Some(action) = &result.recommended_action {
        output.push_str(&format!("Recommended action: {}\n", action));
    }

    Ok(output)
}

/// Render an assessment as pretty JSON.
pub fn render_json(result: &RiskAssessmentResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

/// Render an intent classification as text.
pub fn render_intent_text(result: &IntentClassificationResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("Intent:     {}\n", result.intent.as_str()));
    output.push_str(&format!("Confidence: {:.2}\n", result.confidence));
    if result.matched_keywords.is_empty() {
        output.push_str("Matched:    (none)\n");
    } else {
        output.push_str(&format!("Matched:    {}\n", result.matched_keywords.join(", ")));
    }
    output
}

/// Render an intent classification as pretty JSON.
pub fn render_intent_json(result: &IntentClassificationResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::SeverityRatings;
    use crate::{assess, intent};

    fn sample_input() -> RiskAssessmentInput {
        RiskAssessmentInput {
            severity: SeverityRatings {
                people: 8,
                environment: 4,
                cost: 2,
                reputation: 0,
                legal: 0,
            },
            likelihood: 8,
            free_text: None,
        }
    }

    #[test]
    fn test_text_rendering_is_deterministic() {
        let input = sample_input();
        let result = assess(&input);
        let registry = ScaleRegistry::default();
        let first = render_text(&result, &input, &registry).unwrap();
        let second = render_text(&result, &input, &registry).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Permanent disability"));
        assert!(first.contains("Likely"));
    }

    #[test]
    fn test_json_rendering_omits_absent_action() {
        let input = sample_input();
        let result = assess(&input);
        let json = render_json(&result);
        assert!(!json.contains("recommended_action"));

        let parsed: RiskAssessmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_intent_rendering_round_trips() {
        let classified = intent::classify("I need to report an incident");
        let json = render_intent_json(&classified);
        let parsed: IntentClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, classified);
    }
}

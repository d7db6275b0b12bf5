//! Riskmatrix core library - EHS risk scoring and classification engine

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every engine function is pure: no IO, no clocks, no randomness,
//   no shared mutable state
// - Identical input yields identical output
// - Numeric inputs are clamped to [0,10] before use
// - Priority bands and workflow triggers share one set of threshold constants

pub mod config;
pub mod error;
pub mod intent;
pub mod priority;
pub mod recommend;
pub mod report;
pub mod risk;
pub mod scales;
pub mod triggers;

pub use config::{load_and_resolve, ResolvedConfig, RiskmatrixConfig};
pub use error::EngineError;
pub use intent::{IntentClassificationResult, IntentLabel};
pub use priority::PriorityLevel;
pub use report::{render_json, render_text, RiskAssessmentResult};
pub use risk::{AggregationPolicy, RiskAssessmentInput, SeverityRatings};
pub use scales::{ScaleRegistry, SeverityCategory};
pub use triggers::WorkflowTriggers;

/// Run a full assessment with the default aggregation policy.
pub fn assess(input: &RiskAssessmentInput) -> RiskAssessmentResult {
    assess_with_policy(input, AggregationPolicy::default())
}

/// Run a full assessment under an explicit aggregation policy.
///
/// Pipeline: aggregate severity and likelihood into a risk score, band it
/// into a priority, evaluate workflow triggers, and suggest a corrective
/// action from the free text when one was supplied.
pub fn assess_with_policy(
    input: &RiskAssessmentInput,
    policy: AggregationPolicy,
) -> RiskAssessmentResult {
    let aggregate = risk::compute(input, policy);
    let priority = priority::classify(aggregate.risk_score);
    let triggers = triggers::evaluate(aggregate.risk_score);
    let recommended_action = input
        .free_text
        .as_deref()
        .map(|text| recommend::suggest(text, &[]));

    RiskAssessmentResult {
        aggregate_severity: aggregate.aggregate_severity,
        risk_score: aggregate.risk_score,
        priority,
        recommended_action,
        triggers,
    }
}

/// Run a full assessment using the policy from a resolved configuration.
pub fn assess_with_config(
    input: &RiskAssessmentInput,
    config: &ResolvedConfig,
) -> RiskAssessmentResult {
    assess_with_policy(input, config.policy)
}

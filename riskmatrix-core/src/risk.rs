//! Risk score calculation
//!
//! Global invariants enforced:
//! - Deterministic, side-effect-free computation
//! - Inputs clamped to [0,10] before use
//! - Scores land on [0,100] under either aggregation policy

use crate::scales::SeverityCategory;
use serde::{Deserialize, Serialize};

/// Strategy for collapsing the five severity dimensions into one number.
///
/// Both formulas were in production use; they disagree materially on the same
/// input, so the choice is explicit and selectable rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// `aggregate = max(severity)`, `risk = aggregate * likelihood`.
    MaxSeverity,
    /// `aggregate = Σ severity[c] * weight[c]`, `risk = aggregate * likelihood / 10`.
    #[default]
    WeightedCategory,
}

impl AggregationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationPolicy::MaxSeverity => "max_severity",
            AggregationPolicy::WeightedCategory => "weighted_category",
        }
    }
}

/// Fixed category weights for the weighted policy. Sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub people: f64,
    pub environment: f64,
    pub cost: f64,
    pub reputation: f64,
    pub legal: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        CategoryWeights {
            people: 0.30,
            environment: 0.20,
            cost: 0.20,
            reputation: 0.15,
            legal: 0.15,
        }
    }
}

impl CategoryWeights {
    pub fn weight_for(&self, category: SeverityCategory) -> f64 {
        match category {
            SeverityCategory::People => self.people,
            SeverityCategory::Environment => self.environment,
            SeverityCategory::Cost => self.cost,
            SeverityCategory::Reputation => self.reputation,
            SeverityCategory::Legal => self.legal,
        }
    }
}

/// Raw per-dimension severity ratings as submitted by the caller.
///
/// Values may arrive outside [0,10]; they are clamped before any computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeverityRatings {
    #[serde(default)]
    pub people: i32,
    #[serde(default)]
    pub environment: i32,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub reputation: i32,
    #[serde(default)]
    pub legal: i32,
}

impl SeverityRatings {
    pub fn get(&self, category: SeverityCategory) -> i32 {
        match category {
            SeverityCategory::People => self.people,
            SeverityCategory::Environment => self.environment,
            SeverityCategory::Cost => self.cost,
            SeverityCategory::Reputation => self.reputation,
            SeverityCategory::Legal => self.legal,
        }
    }
}

/// Input to one risk assessment. A transient value object; the engine keeps
/// no reference to it after the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskAssessmentInput {
    pub severity: SeverityRatings,
    pub likelihood: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// Output of the calculator: the collapsed severity and the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeverityAggregate {
    pub aggregate_severity: f64,
    pub risk_score: f64,
}

/// Clamp a raw rating into the [0,10] scoring range.
fn clamp_rating(value: i32) -> f64 {
    f64::from(value.clamp(0, 10))
}

/// Round to one decimal place, half away from zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute the aggregate severity and risk score under the given policy.
pub fn compute(input: &RiskAssessmentInput, policy: AggregationPolicy) -> SeverityAggregate {
    let likelihood = clamp_rating(input.likelihood);

    let (aggregate, risk) = match policy {
        AggregationPolicy::MaxSeverity => {
            let aggregate = SeverityCategory::ALL
                .iter()
                .map(|&c| clamp_rating(input.severity.get(c)))
                .fold(0.0_f64, f64::max);
            (aggregate, aggregate * likelihood)
        }
        AggregationPolicy::WeightedCategory => {
            let weights = CategoryWeights::default();
            let aggregate: f64 = SeverityCategory::ALL
                .iter()
                .map(|&c| clamp_rating(input.severity.get(c)) * weights.weight_for(c))
                .sum();
            (aggregate, aggregate * likelihood / 10.0)
        }
    };

    SeverityAggregate {
        aggregate_severity: round_one_decimal(aggregate),
        risk_score: round_one_decimal(risk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_input() -> RiskAssessmentInput {
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
    fn test_weighted_policy_scenario() {
        // 8*0.30 + 4*0.20 + 2*0.20 = 3.6; 3.6 * 8 / 10 = 2.88 -> 2.9 at one decimal
        let result = compute(&scenario_input(), AggregationPolicy::WeightedCategory);
        assert_eq!(result.aggregate_severity, 3.6);
        assert_eq!(result.risk_score, 2.9);
    }

    #[test]
    fn test_max_severity_policy_scenario() {
        let result = compute(&scenario_input(), AggregationPolicy::MaxSeverity);
        assert_eq!(result.aggregate_severity, 8.0);
        assert_eq!(result.risk_score, 64.0);
    }

    #[test]
    fn test_zero_input_scores_zero_under_both_policies() {
        let input = RiskAssessmentInput::default();
        for policy in [AggregationPolicy::MaxSeverity, AggregationPolicy::WeightedCategory] {
            let result = compute(&input, policy);
            assert_eq!(result.aggregate_severity, 0.0);
            assert_eq!(result.risk_score, 0.0);
        }
    }

    #[test]
    fn test_out_of_range_ratings_are_clamped() {
        let input = RiskAssessmentInput {
            severity: SeverityRatings {
                people: 99,
                environment: -5,
                cost: 0,
                reputation: 0,
                legal: 0,
            },
            likelihood: 200,
            free_text: None,
        };
        let result = compute(&input, AggregationPolicy::MaxSeverity);
        assert_eq!(result.aggregate_severity, 10.0);
        assert_eq!(result.risk_score, 100.0);
    }

    #[test]
    fn test_scores_stay_in_range_under_both_policies() {
        for people in [0, 3, 10] {
            for likelihood in [0, 5, 10] {
                let input = RiskAssessmentInput {
                    severity: SeverityRatings {
                        people,
                        environment: 10,
                        cost: 10,
                        reputation: 10,
                        legal: 10,
                    },
                    likelihood,
                    free_text: None,
                };
                for policy in
                    [AggregationPolicy::MaxSeverity, AggregationPolicy::WeightedCategory]
                {
                    let result = compute(&input, policy);
                    assert!(result.risk_score >= 0.0 && result.risk_score <= 100.0);
                }
            }
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = scenario_input();
        let first = compute(&input, AggregationPolicy::WeightedCategory);
        let second = compute(&input, AggregationPolicy::WeightedCategory);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = CategoryWeights::default();
        let total: f64 = SeverityCategory::ALL.iter().map(|&c| w.weight_for(c)).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}

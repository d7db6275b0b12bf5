//! Severity and likelihood scale registry
//!
//! Global invariants enforced:
//! - Every category holds exactly the tiers 0, 2, 4, 6, 8, 10, ascending
//! - The registry is immutable after construction
//! - Lookups clamp to [0,10] and snap to the nearest tier, ties rounding down

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five impact dimensions. Closed set; never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityCategory {
    People,
    Environment,
    Cost,
    Reputation,
    Legal,
}

impl SeverityCategory {
    /// All categories in canonical order.
    pub const ALL: [SeverityCategory; 5] = [
        SeverityCategory::People,
        SeverityCategory::Environment,
        SeverityCategory::Cost,
        SeverityCategory::Reputation,
        SeverityCategory::Legal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCategory::People => "people",
            SeverityCategory::Environment => "environment",
            SeverityCategory::Cost => "cost",
            SeverityCategory::Reputation => "reputation",
            SeverityCategory::Legal => "legal",
        }
    }
}

/// One rung of a severity or likelihood scale.
///
/// `keywords` are advisory metadata (documentation and search), never used
/// for scoring. `frequency` is populated for likelihood tiers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleTier {
    pub score: u8,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Externally supplied tier overrides, merged over the embedded defaults.
///
/// Both fields are optional; a category present in `severity` replaces that
/// category's default tiers wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleDataset {
    #[serde(default)]
    pub severity: BTreeMap<SeverityCategory, Vec<ScaleTier>>,
    #[serde(default)]
    pub likelihood: Option<Vec<ScaleTier>>,
}

/// Immutable severity/likelihood tier tables.
///
/// Constructed once at startup (defaults, optionally merged with a dataset
/// override) and shared by reference; read-only afterwards, safe to share
/// across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRegistry {
    severity: BTreeMap<SeverityCategory, Vec<ScaleTier>>,
    likelihood: Vec<ScaleTier>,
}

/// Tier scores defined by every scale.
pub const TIER_SCORES: [u8; 6] = [0, 2, 4, 6, 8, 10];

impl Default for ScaleRegistry {
    fn default() -> Self {
        ScaleRegistry {
            severity: default_severity_scale(),
            likelihood: default_likelihood_scale(),
        }
    }
}

impl ScaleRegistry {
    /// Build a registry from a dataset override merged over the defaults.
    pub fn from_dataset(dataset: &ScaleDataset) -> Result<Self, EngineError> {
        let mut registry = ScaleRegistry::default();
        for (category, tiers) in &dataset.severity {
            registry.severity.insert(*category, tiers.clone());
        }
        if let Some(tiers) = &dataset.likelihood {
            registry.likelihood = tiers.clone();
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Look up the severity tier for a raw score.
    ///
    /// The score is clamped to [0,10], then snapped to the nearest defined
    /// tier with ties rounding down (5 snaps to 4).
    pub fn tier_for(
        &self,
        category: SeverityCategory,
        score: i32,
    ) -> Result<&ScaleTier, EngineError> {
        let tiers = self
            .severity
            .get(&category)
            .ok_or_else(|| EngineError::InvalidCategory {
                category: category.as_str().to_string(),
            })?;
        find_tier(tiers, score)
    }

    /// Look up the likelihood tier for a raw score (same clamp-and-snap rule).
    pub fn tier_for_likelihood(&self, score: i32) -> Result<&ScaleTier, EngineError> {
        find_tier(&self.likelihood, score)
    }

    /// Severity tiers for one category, ascending by score.
    pub fn severity_tiers(&self, category: SeverityCategory) -> Result<&[ScaleTier], EngineError> {
        self.severity
            .get(&category)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::InvalidCategory {
                category: category.as_str().to_string(),
            })
    }

    /// Likelihood tiers, ascending by score.
    pub fn likelihood_tiers(&self) -> &[ScaleTier] {
        &self.likelihood
    }

    /// Check the registry invariants: every category carries exactly the
    /// tiers 0,2,4,6,8,10 in ascending order, and so does the likelihood
    /// scale.
    pub fn validate(&self) -> Result<(), EngineError> {
        for category in SeverityCategory::ALL {
            let tiers = self
                .severity
                .get(&category)
                .ok_or_else(|| EngineError::InvalidScale {
                    reason: format!("missing severity tiers for category '{}'", category.as_str()),
                })?;
            validate_tier_scores(tiers, category.as_str())?;
        }
        validate_tier_scores(&self.likelihood, "likelihood")?;
        Ok(())
    }
}

/// Clamp to [0,10] and snap to the nearest even tier score, ties down.
fn snap_score(score: i32) -> u8 {
    let clamped = score.clamp(0, 10) as u8;
    clamped - (clamped % 2)
}

fn find_tier(tiers: &[ScaleTier], score: i32) -> Result<&ScaleTier, EngineError> {
    let snapped = snap_score(score);
    tiers
        .iter()
        .find(|t| t.score == snapped)
        .ok_or_else(|| EngineError::InvalidScale {
            reason: format!("no tier defined for score {}", snapped),
        })
}

fn validate_tier_scores(tiers: &[ScaleTier], scale_name: &str) -> Result<(), EngineError> {
    let scores: Vec<u8> = tiers.iter().map(|t| t.score).collect();
    if scores != TIER_SCORES {
        return Err(EngineError::InvalidScale {
            reason: format!(
                "scale '{}' must define exactly the tiers {:?} in ascending order (got {:?})",
                scale_name, TIER_SCORES, scores
            ),
        });
    }
    Ok(())
}

fn tier(score: u8, label: &str, description: &str, keywords: &[&str]) -> ScaleTier {
    ScaleTier {
        score,
        label: label.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        frequency: None,
    }
}

fn likelihood_tier(score: u8, label: &str, description: &str, frequency: &str) -> ScaleTier {
    ScaleTier {
        score,
        label: label.to_string(),
        description: description.to_string(),
        keywords: Vec::new(),
        frequency: Some(frequency.to_string()),
    }
}

fn default_likelihood_scale() -> Vec<ScaleTier> {
    vec![
        likelihood_tier(0, "Impossible", "Cannot happen", "never"),
        likelihood_tier(2, "Rare", "Extremely unlikely", "less than once in 10 years"),
        likelihood_tier(4, "Unlikely", "Could happen exceptionally", "once in 5-10 years"),
        likelihood_tier(6, "Possible", "Might happen occasionally", "once a year"),
        likelihood_tier(8, "Likely", "Expected to happen", "several times a year"),
        likelihood_tier(
            10,
            "Almost Certain",
            "Will almost certainly happen",
            "monthly or more often",
        ),
    ]
}

fn default_severity_scale() -> BTreeMap<SeverityCategory, Vec<ScaleTier>> {
    let mut scale = BTreeMap::new();

    scale.insert(
        SeverityCategory::People,
        vec![
            tier(0, "No injury", "No injury", &["safe", "no harm"]),
            tier(2, "First aid", "First aid only", &["minor", "first aid"]),
            tier(4, "Medical treatment", "Medical treatment case", &["medical", "treatment"]),
            tier(6, "Hospitalization", "Hospitalization required", &["hospital", "serious"]),
            tier(8, "Permanent disability", "Permanent disability", &["disability"]),
            tier(10, "Fatality", "One or more fatalities", &["death", "fatal"]),
        ],
    );

    scale.insert(
        SeverityCategory::Environment,
        vec![
            tier(0, "No impact", "No environmental impact", &["clean", "contained"]),
            tier(2, "Trivial release", "Trivial release contained at the source", &["drip"]),
            tier(4, "Minor spill", "Minor spill or leak", &["small spill", "minor"]),
            tier(6, "Moderate release", "Moderate release requiring cleanup", &["cleanup"]),
            tier(
                8,
                "Major damage",
                "Major environmental damage",
                &["major spill", "contamination"],
            ),
            tier(
                10,
                "Catastrophic damage",
                "Catastrophic or irreversible environmental damage",
                &["irreversible"],
            ),
        ],
    );

    scale.insert(
        SeverityCategory::Cost,
        vec![
            tier(0, "No cost", "No financial loss", &[]),
            tier(2, "Negligible", "Loss below $1k", &["petty"]),
            tier(4, "Minor", "Loss between $1k and $10k", &[]),
            tier(6, "Moderate", "Loss between $10k and $100k", &[]),
            tier(8, "Major", "Loss between $100k and $1M", &[]),
            tier(10, "Severe", "Loss above $1M", &["catastrophic"]),
        ],
    );

    scale.insert(
        SeverityCategory::Reputation,
        vec![
            tier(0, "No attention", "No external attention", &[]),
            tier(2, "Internal", "Internal awareness only", &[]),
            tier(4, "Local", "Local community attention", &["complaint"]),
            tier(6, "Regional", "Regional media coverage", &["media"]),
            tier(8, "National", "National media coverage", &["headline"]),
            tier(10, "International", "International coverage, lasting brand damage", &[]),
        ],
    );

    scale.insert(
        SeverityCategory::Legal,
        vec![
            tier(0, "None", "No legal exposure", &[]),
            tier(2, "Minor non-compliance", "Minor non-compliance, corrected on the spot", &[]),
            tier(4, "Regulatory notice", "Regulatory notice or improvement order", &["notice"]),
            tier(6, "Citation", "Citation or fine", &["fine", "citation"]),
            tier(8, "Prosecution", "Prosecution or major fine", &["prosecution"]),
            tier(
                10,
                "License revocation",
                "License revocation or criminal liability",
                &["criminal"],
            ),
        ],
    );

    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_satisfy_invariants() {
        let registry = ScaleRegistry::default();
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_tier_snapping_ties_round_down() {
        let registry = ScaleRegistry::default();
        let t = registry.tier_for(SeverityCategory::People, 5).unwrap();
        assert_eq!(t.score, 4);
        let t = registry.tier_for(SeverityCategory::People, 7).unwrap();
        assert_eq!(t.score, 6);
        let t = registry.tier_for_likelihood(1).unwrap();
        assert_eq!(t.score, 0);
    }

    #[test]
    fn test_tier_lookup_clamps_out_of_range() {
        let registry = ScaleRegistry::default();
        assert_eq!(registry.tier_for(SeverityCategory::Legal, 99).unwrap().score, 10);
        assert_eq!(registry.tier_for(SeverityCategory::Legal, -3).unwrap().score, 0);
        assert_eq!(registry.tier_for_likelihood(42).unwrap().score, 10);
    }

    #[test]
    fn test_dataset_override_replaces_category() {
        let mut dataset = ScaleDataset::default();
        let tiers: Vec<ScaleTier> = TIER_SCORES
            .iter()
            .map(|&s| tier(s, &format!("L{}", s), "override", &[]))
            .collect();
        dataset.severity.insert(SeverityCategory::Cost, tiers);

        let registry = ScaleRegistry::from_dataset(&dataset).unwrap();
        assert_eq!(registry.tier_for(SeverityCategory::Cost, 4).unwrap().label, "L4");
        // Other categories keep the defaults
        assert_eq!(
            registry.tier_for(SeverityCategory::People, 10).unwrap().label,
            "Fatality"
        );
    }

    #[test]
    fn test_dataset_override_rejects_bad_tier_set() {
        let mut dataset = ScaleDataset::default();
        dataset.severity.insert(
            SeverityCategory::People,
            vec![tier(0, "None", "none", &[]), tier(10, "Worst", "worst", &[])],
        );

        let err = ScaleRegistry::from_dataset(&dataset).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScale { .. }));
    }

    #[test]
    fn test_dataset_override_rejects_misordered_tiers() {
        let mut dataset = ScaleDataset::default();
        let mut tiers: Vec<ScaleTier> = TIER_SCORES
            .iter()
            .map(|&s| tier(s, "x", "x", &[]))
            .collect();
        tiers.swap(0, 5);
        dataset.likelihood = Some(tiers);

        let err = ScaleRegistry::from_dataset(&dataset).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScale { .. }));
    }

    #[test]
    fn test_likelihood_tiers_carry_frequency() {
        let registry = ScaleRegistry::default();
        for t in registry.likelihood_tiers() {
            assert!(t.frequency.is_some());
        }
    }
}

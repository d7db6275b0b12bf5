//! Configuration file support for Riskmatrix
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.riskmatrixrc.json` in the project root
//! 3. `riskmatrix.config.json` in the project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::risk::AggregationPolicy;
use crate::scales::{ScaleDataset, ScaleRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in the project root, in order.
const CONFIG_FILE_NAMES: [&str; 2] = [".riskmatrixrc.json", "riskmatrix.config.json"];

/// Riskmatrix configuration loaded from a JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskmatrixConfig {
    /// Default aggregation policy ("max_severity" or "weighted_category")
    #[serde(default)]
    pub policy: Option<AggregationPolicy>,

    /// Severity/likelihood tier overrides, merged over the embedded defaults
    #[serde(default)]
    pub scales: Option<ScaleDataset>,
}

/// Resolved configuration ready for use by the engine.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Aggregation policy to use when the caller does not pick one
    pub policy: AggregationPolicy,
    /// Scale registry (defaults merged with any override dataset)
    pub registry: ScaleRegistry,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            policy: AggregationPolicy::default(),
            registry: ScaleRegistry::default(),
            config_path: None,
        }
    }
}

impl RiskmatrixConfig {
    /// Validate the configuration for logical errors.
    pub fn validate(&self) -> Result<()> {
        if let Some(dataset) = &self.scales {
            ScaleRegistry::from_dataset(dataset)
                .map(|_| ())
                .context("scales override is invalid")?;
        }
        Ok(())
    }

    /// Resolve config into a form ready for use.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let registry = match &self.scales {
            Some(dataset) => {
                ScaleRegistry::from_dataset(dataset).context("scales override is invalid")?
            }
            None => ScaleRegistry::default(),
        };

        Ok(ResolvedConfig {
            policy: self.policy.unwrap_or_default(),
            registry,
            config_path: None,
        })
    }
}

/// Load a config file from an explicit path or by probing the project root,
/// then resolve it. Returns defaults when no config file exists.
pub fn load_and_resolve(project_root: &Path, explicit_path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_config(project_root),
    };

    let Some(path) = config_path else {
        return Ok(ResolvedConfig::default());
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: RiskmatrixConfig = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    let mut resolved = config.resolve()?;
    resolved.config_path = Some(path);
    Ok(resolved)
}

/// Probe the project root for a config file, in search order.
fn discover_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::SeverityCategory;

    #[test]
    fn test_defaults_when_no_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert_eq!(resolved.policy, AggregationPolicy::WeightedCategory);
        assert!(resolved.config_path.is_none());
    }

    #[test]
    fn test_discovers_rc_file_before_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".riskmatrixrc.json"), r#"{"policy": "max_severity"}"#)
            .unwrap();
        std::fs::write(
            dir.path().join("riskmatrix.config.json"),
            r#"{"policy": "weighted_category"}"#,
        )
        .unwrap();

        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert_eq!(resolved.policy, AggregationPolicy::MaxSeverity);
        assert!(resolved
            .config_path
            .unwrap()
            .ends_with(".riskmatrixrc.json"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(load_and_resolve(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".riskmatrixrc.json");
        std::fs::write(&path, r#"{"threshold": 12}"#).unwrap();
        assert!(load_and_resolve(dir.path(), None).is_err());
    }

    #[test]
    fn test_scales_override_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("riskmatrix.config.json");
        let config = r#"{
            "scales": {
                "likelihood": [
                    {"score": 0, "label": "Never", "description": "cannot occur"},
                    {"score": 2, "label": "Rare", "description": "rare"},
                    {"score": 4, "label": "Unlikely", "description": "unlikely"},
                    {"score": 6, "label": "Possible", "description": "possible"},
                    {"score": 8, "label": "Likely", "description": "likely"},
                    {"score": 10, "label": "Certain", "description": "certain"}
                ]
            }
        }"#;
        std::fs::write(&path, config).unwrap();

        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert_eq!(resolved.registry.tier_for_likelihood(0).unwrap().label, "Never");
        // Severity defaults untouched
        assert_eq!(
            resolved.registry.tier_for(SeverityCategory::People, 10).unwrap().label,
            "Fatality"
        );
    }

    #[test]
    fn test_invalid_scales_override_fails_validation() {
        let config: RiskmatrixConfig = serde_json::from_str(
            r#"{
                "scales": {
                    "severity": {
                        "people": [
                            {"score": 0, "label": "None", "description": "none"},
                            {"score": 10, "label": "Fatal", "description": "fatal"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
        assert!(config.resolve().is_err());
    }
}

//! Priority banding
//!
//! The thresholds below are the single source of truth for every consumer:
//! the classifier here and the workflow trigger rules in `triggers`. They are
//! shared by all record types (incidents, concerns, risk-register entries).

use serde::{Deserialize, Serialize};

/// Inclusive lower bound of the medium band.
pub const MEDIUM_MIN: f64 = 25.0;
/// Inclusive lower bound of the high band. Also the auto-CAPA trigger point.
pub const HIGH_MIN: f64 = 50.0;
/// Inclusive lower bound of the critical band. Also the escalation trigger point.
pub const CRITICAL_MIN: f64 = 75.0;

/// Priority band, ordered low < medium < high < critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "low",
            PriorityLevel::Medium => "medium",
            PriorityLevel::High => "high",
            PriorityLevel::Critical => "critical",
        }
    }
}

/// Map a risk score to its priority band.
pub fn classify(risk_score: f64) -> PriorityLevel {
    if risk_score < MEDIUM_MIN {
        PriorityLevel::Low
    } else if risk_score < HIGH_MIN {
        PriorityLevel::Medium
    } else if risk_score < CRITICAL_MIN {
        PriorityLevel::High
    } else {
        PriorityLevel::Critical
    }
}

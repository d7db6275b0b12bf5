//! Workflow trigger rules
//!
//! Pure decisions only: the booleans returned here tell the orchestration
//! layer whether to create a CAPA and whether to send an escalation
//! notification. No side effects are issued from this module.

use crate::priority;
use serde::{Deserialize, Serialize};

/// Follow-up actions requested by an assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowTriggers {
    pub auto_create_capa: bool,
    pub escalate_notification: bool,
}

/// Evaluate trigger rules for a risk score.
///
/// Both cut points are the priority band thresholds, referenced from
/// `priority` so they cannot drift out of sync: CAPA at the high boundary,
/// escalation at the critical boundary.
pub fn evaluate(risk_score: f64) -> WorkflowTriggers {
    WorkflowTriggers {
        auto_create_capa: risk_score >= priority::HIGH_MIN,
        escalate_notification: risk_score >= priority::CRITICAL_MIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_scenarios() {
        let t = evaluate(76.0);
        assert!(t.auto_create_capa);
        assert!(t.escalate_notification);

        let t = evaluate(60.0);
        assert!(t.auto_create_capa);
        assert!(!t.escalate_notification);

        let t = evaluate(49.9);
        assert!(!t.auto_create_capa);
        assert!(!t.escalate_notification);
    }

    #[test]
    fn test_escalation_implies_capa() {
        let mut score = 0.0;
        while score <= 100.0 {
            let t = evaluate(score);
            if t.escalate_notification {
                assert!(t.auto_create_capa);
            }
            score += 0.25;
        }
    }

    #[test]
    fn test_thresholds_match_priority_bands() {
        assert!(evaluate(priority::HIGH_MIN).auto_create_capa);
        assert!(!evaluate(priority::HIGH_MIN - 0.1).auto_create_capa);
        assert!(evaluate(priority::CRITICAL_MIN).escalate_notification);
        assert!(!evaluate(priority::CRITICAL_MIN - 0.1).escalate_notification);
    }
}

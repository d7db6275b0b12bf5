//! Corrective-action recommendation
//!
//! Template selection, not text generation: the hazard description and
//! root-cause notes are matched against six fixed categories and the winning
//! category's canned remediation sentence is returned verbatim.

use serde::{Deserialize, Serialize};

/// Remediation category, listed in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Training,
    Maintenance,
    Ppe,
    Housekeeping,
    Supervision,
    Procedure,
}

impl ActionCategory {
    /// Categories in the fixed priority order: the first category whose
    /// keyword set matches wins.
    pub const ALL: [ActionCategory; 6] = [
        ActionCategory::Training,
        ActionCategory::Maintenance,
        ActionCategory::Ppe,
        ActionCategory::Housekeeping,
        ActionCategory::Supervision,
        ActionCategory::Procedure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Training => "training",
            ActionCategory::Maintenance => "maintenance",
            ActionCategory::Ppe => "ppe",
            ActionCategory::Housekeeping => "housekeeping",
            ActionCategory::Supervision => "supervision",
            ActionCategory::Procedure => "procedure",
        }
    }

    /// Lowercase substrings that select this category. "train" deliberately
    /// covers trained/untrained/training; "supervis" covers
    /// supervisor/supervised/unsupervised.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ActionCategory::Training => {
                &["train", "competen", "unfamiliar", "did not know", "inexperienc"]
            }
            ActionCategory::Maintenance => &[
                "maintenance",
                "broken",
                "worn",
                "malfunction",
                "defective",
                "leaking",
                "corroded",
            ],
            ActionCategory::Ppe => &[
                "ppe",
                "glove",
                "goggle",
                "helmet",
                "respirator",
                "protective equipment",
                "face shield",
            ],
            ActionCategory::Housekeeping => &[
                "housekeeping",
                "clutter",
                "debris",
                "slippery",
                "obstructed",
                "blocked",
                "untidy",
            ],
            ActionCategory::Supervision => {
                &["supervis", "unauthorized", "permit", "lone work"]
            }
            ActionCategory::Procedure => {
                &["procedure", "sop", "work instruction", "protocol", "deviat", "shortcut"]
            }
        }
    }

    /// The canned remediation sentence for this category.
    pub fn template(&self) -> &'static str {
        match self {
            ActionCategory::Training => {
                "Deliver targeted retraining and verify competency before the task is resumed"
            }
            ActionCategory::Maintenance => {
                "Schedule corrective maintenance and add the equipment to the preventive maintenance program"
            }
            ActionCategory::Ppe => {
                "Reassess PPE requirements for the task and reissue compliant protective equipment"
            }
            ActionCategory::Housekeeping => {
                "Restore the work area to standard, remove obstructions and add the area to the housekeeping inspection route"
            }
            ActionCategory::Supervision => {
                "Review supervisory coverage and reinforce authorization controls for the task"
            }
            ActionCategory::Procedure => {
                "Revise the written procedure and brief all affected personnel on the changes"
            }
        }
    }
}

/// Returned when no category keyword matches.
pub const FALLBACK_ACTION: &str =
    "Conduct thorough investigation and implement appropriate corrective measures";

/// Pick the remediation category for a description plus root-cause notes, if
/// any keyword matches.
pub fn categorize(description: &str, root_cause_notes: &[String]) -> Option<ActionCategory> {
    let mut haystack = description.to_lowercase();
    for note in root_cause_notes {
        haystack.push(' ');
        haystack.push_str(&note.to_lowercase());
    }

    ActionCategory::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| haystack.contains(k)))
}

/// Suggest a remediation template for a hazard description and root-cause
/// notes. Falls back to a generic investigation action when nothing matches.
pub fn suggest(description: &str, root_cause_notes: &[String]) -> String {
    categorize(description, root_cause_notes)
        .map(|category| category.template().to_string())
        .unwrap_or_else(|| FALLBACK_ACTION.to_string())
}

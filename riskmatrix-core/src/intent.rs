//! Chat intent classification
//!
//! Pure, stateless keyword scoring over fixed tables. No session memory, no
//! model inference; a future model-backed classifier can replace this module
//! without touching callers. Same input always produces the same output.

use serde::{Deserialize, Serialize};

/// Conversational intent of a free-text message. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    ReportIncident,
    SafetyConcern,
    SdsQuery,
    RiskAssessment,
    CapaManagement,
    ReportGeneration,
    TrainingInquiry,
    ComplianceCheck,
    HelpGeneral,
    General,
}

impl IntentLabel {
    /// All intents in tie-break priority order.
    ///
    /// When two or more intents share the maximum positive score, the one
    /// listed earliest here wins. This order is a designed constant, not an
    /// artifact of map iteration. `General` carries no keywords and only
    /// applies when nothing else scores.
    pub const ALL: [IntentLabel; 10] = [
        IntentLabel::ReportIncident,
        IntentLabel::SafetyConcern,
        IntentLabel::SdsQuery,
        IntentLabel::RiskAssessment,
        IntentLabel::CapaManagement,
        IntentLabel::ReportGeneration,
        IntentLabel::TrainingInquiry,
        IntentLabel::ComplianceCheck,
        IntentLabel::HelpGeneral,
        IntentLabel::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::ReportIncident => "report_incident",
            IntentLabel::SafetyConcern => "safety_concern",
            IntentLabel::SdsQuery => "sds_query",
            IntentLabel::RiskAssessment => "risk_assessment",
            IntentLabel::CapaManagement => "capa_management",
            IntentLabel::ReportGeneration => "report_generation",
            IntentLabel::TrainingInquiry => "training_inquiry",
            IntentLabel::ComplianceCheck => "compliance_check",
            IntentLabel::HelpGeneral => "help_general",
            IntentLabel::General => "general",
        }
    }

    /// Keyword table for this intent: lowercase substring, weight.
    ///
    /// Primary-domain intents (incident, concern, SDS, risk) weigh 2.0 per
    /// keyword; secondary intents weigh 1.0-1.8.
    fn keywords(&self) -> &'static [(&'static str, f64)] {
        match self {
            IntentLabel::ReportIncident => &[
                ("incident", 2.0),
                ("accident", 2.0),
                ("injury", 2.0),
                ("injured", 2.0),
                ("hurt", 2.0),
                ("happened", 2.0),
                ("occurred", 2.0),
                ("near miss", 2.0),
            ],
            IntentLabel::SafetyConcern => &[
                ("concern", 2.0),
                ("unsafe", 2.0),
                ("dangerous", 2.0),
                ("hazardous", 2.0),
                ("noticed", 2.0),
                ("observed", 2.0),
            ],
            IntentLabel::SdsQuery => &[
                ("sds", 2.0),
                ("msds", 2.0),
                ("safety data", 2.0),
                ("chemical", 2.0),
                ("substance", 2.0),
                ("material", 2.0),
                ("ghs", 2.0),
            ],
            IntentLabel::RiskAssessment => &[
                ("risk assessment", 2.0),
                ("assess risk", 2.0),
                ("risk score", 2.0),
                ("likelihood", 2.0),
                ("severity", 2.0),
                ("risk matrix", 2.0),
            ],
            IntentLabel::CapaManagement => &[
                ("capa", 1.8),
                ("corrective action", 1.8),
                ("preventive action", 1.8),
                ("action item", 1.8),
                ("remediation", 1.8),
            ],
            IntentLabel::ReportGeneration => &[
                ("generate report", 1.5),
                ("export", 1.5),
                ("summary report", 1.5),
                ("statistics", 1.5),
                ("dashboard", 1.5),
            ],
            IntentLabel::TrainingInquiry => &[
                ("training", 1.2),
                ("course", 1.2),
                ("certification", 1.2),
                ("onboarding", 1.2),
            ],
            IntentLabel::ComplianceCheck => &[
                ("compliance", 1.5),
                ("regulation", 1.5),
                ("osha", 1.5),
                ("audit", 1.5),
                ("legal requirement", 1.5),
            ],
            IntentLabel::HelpGeneral => &[
                ("help", 1.0),
                ("how do i", 1.0),
                ("what can you", 1.0),
                ("assist", 1.0),
                ("guide", 1.0),
                ("explain", 1.0),
            ],
            IntentLabel::General => &[],
        }
    }
}

/// Classification outcome. `confidence` is advisory; it never influences
/// which intent is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IntentClassificationResult {
    pub intent: IntentLabel,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
}

pub const CONFIDENCE_FLOOR: f64 = 0.6;
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Classify a free-text message by keyword scoring.
///
/// The intent with the strictly highest total wins; on a tie the earliest
/// entry in `IntentLabel::ALL` wins; a zero maximum yields `General`.
pub fn classify(text: &str) -> IntentClassificationResult {
    let lowered = text.to_lowercase();

    let mut best = IntentLabel::General;
    let mut best_score = 0.0_f64;
    let mut best_matches: Vec<String> = Vec::new();

    for intent in IntentLabel::ALL {
        let mut score = 0.0;
        let mut matches = Vec::new();
        for &(keyword, weight) in intent.keywords() {
            if lowered.contains(keyword) {
                score += weight;
                matches.push(keyword.to_string());
            }
        }
        if score > best_score {
            best = intent;
            best_score = score;
            best_matches = matches;
        }
    }

    IntentClassificationResult {
        intent: best,
        confidence: confidence_for(&lowered),
        matched_keywords: best_matches,
    }
}

/// Confidence grows with message length: floor 0.6 for terse input, +0.05
/// per word, capped at 0.95. Monotonic in word count.
fn confidence_for(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    (CONFIDENCE_FLOOR + words as f64 * 0.05).min(CONFIDENCE_CAP)
}

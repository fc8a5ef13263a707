//! Value types shared by the evaluators and the gate result.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which lifecycle checkpoint the gate runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Advisory run while the outline is being planned
    Planning,

    /// Enforcing run right before publication
    PrePublish,
}

impl fmt::Display for GateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateMode::Planning => write!(f, "planning"),
            GateMode::PrePublish => write!(f, "pre_publish"),
        }
    }
}

impl FromStr for GateMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "planning" | "plan" => Ok(GateMode::Planning),
            "pre_publish" | "prepublish" | "publish" => Ok(GateMode::PrePublish),
            _ => anyhow::bail!("Unknown gate mode: {}", s),
        }
    }
}

/// The five per-dimension scores, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditScores {
    pub serp_strength: u8,
    pub aeo_coverage: u8,
    pub credibility: u8,
    pub intent_match: u8,
    /// Raw risk; higher is worse
    pub risk: u8,
}

/// Trust-signal categories checked by the credibility evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustSignal {
    Experience,
    Proof,
    Local,
    Process,
    Visual,
}

impl fmt::Display for TrustSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustSignal::Experience => write!(f, "experience"),
            TrustSignal::Proof => write!(f, "proof"),
            TrustSignal::Local => write!(f, "local"),
            TrustSignal::Process => write!(f, "process"),
            TrustSignal::Visual => write!(f, "visual"),
        }
    }
}

/// Graded strength of a detected signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

/// Where an injected snippet should land in the finished article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementHint {
    Hero,
    Introduction,
    ProcessSection,
    BeforeCallToAction,
    Closing,
}

/// Suggested trust-signal snippet. Surfaced as guidance, never inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityInjection {
    #[serde(rename = "type")]
    pub kind: TrustSignal,
    pub content: String,
    pub placement: PlacementHint,
}

/// Compliance area that drives disclaimer copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCategory {
    Legal,
    Medical,
    Finance,
    Children,
    General,
}

/// Disclaimer and verification requirements for the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub disclaimer_required: bool,
    pub disclaimers: Vec<String>,
    pub claims_requiring_verification: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<ComplianceCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_mode_from_str() {
        assert_eq!("planning".parse::<GateMode>().unwrap(), GateMode::Planning);
        assert_eq!("pre-publish".parse::<GateMode>().unwrap(), GateMode::PrePublish);
        assert_eq!("PrePublish".parse::<GateMode>().unwrap(), GateMode::PrePublish);
        assert!("draft".parse::<GateMode>().is_err());
    }

    #[test]
    fn test_injection_serializes_type_field() {
        let injection = CredibilityInjection {
            kind: TrustSignal::Proof,
            content: "\"Brilliant service\"".to_string(),
            placement: PlacementHint::BeforeCallToAction,
        };

        let json = serde_json::to_value(&injection).unwrap();
        assert_eq!(json["type"], "proof");
        assert_eq!(json["placement"], "before_call_to_action");
    }
}

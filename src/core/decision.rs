//! Gate decision types.
//!
//! `ContentIntelGateResult` is the single value the gate hands back. It
//! carries the decision, the approved rewrites and every evaluator report,
//! so callers can explain a block (or an approval) without re-running
//! anything.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{
    ApprovedOutline, AuditGateInput, AuditScores, ComplianceResult, CredibilityInjection, GateMode,
};
use crate::evaluators::{
    AeoCoverage, CredibilityEvaluation, IntentValidation, OutlineAlignment, RiskScan,
    TitleAnalysis,
};

/// Full per-evaluator reports behind a decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateAnalysis {
    pub title: TitleAnalysis,
    pub intent: IntentValidation,
    pub aeo: AeoCoverage,
    pub credibility: CredibilityEvaluation,
    pub risk: RiskScan,
    pub outline_alignment: OutlineAlignment,
}

/// Result of one gate invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIntelGateResult {
    pub approved: bool,
    pub mode: GateMode,

    /// Weighted blend of the five scores
    pub overall_score: f64,

    /// Working title: the rewrite when the proposal scored low, else the proposal's
    pub rewritten_title: String,
    pub approved_outline: ApprovedOutline,
    pub approved_keyphrase: String,
    pub approved_meta_description: String,

    pub scores: AuditScores,

    pub warnings: Vec<String>,
    pub blockers: Vec<String>,
    pub suggestions: Vec<String>,

    pub credibility_injections: Vec<CredibilityInjection>,
    pub compliance: ComplianceResult,

    pub analysis: GateAnalysis,
}

impl ContentIntelGateResult {
    /// Reduce to a pass/fail verdict
    pub fn verdict(&self) -> GateVerdict {
        GateVerdict {
            pass: self.approved,
            reason: if self.approved {
                None
            } else {
                self.blockers.first().cloned()
            },
        }
    }

    /// Human-readable summary used by the CLI's markdown output
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let status = if self.approved { "APPROVED" } else { "BLOCKED" };
        out.push_str(&format!(
            "# Content gate: {} ({}, score {:.1})\n\n",
            status, self.mode, self.overall_score
        ));

        out.push_str("## Scores\n\n");
        out.push_str(&format!("- SERP strength: {}\n", self.scores.serp_strength));
        out.push_str(&format!("- AEO coverage: {}\n", self.scores.aeo_coverage));
        out.push_str(&format!("- Credibility: {}\n", self.scores.credibility));
        out.push_str(&format!("- Intent match: {}\n", self.scores.intent_match));
        out.push_str(&format!("- Risk: {}\n\n", self.scores.risk));

        out.push_str(&format!("**Title:** {}\n\n", self.rewritten_title));
        out.push_str(&format!("**Keyphrase:** {}\n\n", self.approved_keyphrase));
        out.push_str(&format!("**Meta:** {}\n\n", self.approved_meta_description));

        for (heading, items) in [
            ("Blockers", &self.blockers),
            ("Warnings", &self.warnings),
            ("Suggestions", &self.suggestions),
        ] {
            if items.is_empty() {
                continue;
            }
            out.push_str(&format!("## {}\n\n", heading));
            for item in items {
                out.push_str(&format!("- {}\n", item));
            }
            out.push('\n');
        }

        if !self.compliance.disclaimers.is_empty() {
            out.push_str("## Required disclaimers\n\n");
            for disclaimer in &self.compliance.disclaimers {
                out.push_str(&format!("> {}\n\n", disclaimer));
            }
        }

        out.push_str("## Approved outline\n\n");
        out.push_str(&self.approved_outline.to_markdown());
        out
    }
}

/// Approval verdict with the first blocker when blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result tagged with a fingerprint of the input it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub input_fingerprint: String,
    pub result: ContentIntelGateResult,
}

impl AuditReport {
    pub fn new(input: &AuditGateInput, result: ContentIntelGateResult) -> anyhow::Result<Self> {
        Ok(Self {
            input_fingerprint: fingerprint_input(input)?,
            result,
        })
    }
}

/// `sha256:<hex>` of the input's JSON encoding
pub fn fingerprint_input(input: &AuditGateInput) -> anyhow::Result<String> {
    let canonical = serde_json::to_string(input)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageRole, ProposedContent, SearchIntent, TaskContext};

    fn input(title: &str) -> AuditGateInput {
        AuditGateInput::new(
            TaskContext::new(PageRole::Support, SearchIntent::Learn, "gutter cleaning"),
            ProposedContent {
                title: title.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_fingerprint_is_stable_and_prefixed() {
        let a = fingerprint_input(&input("How to Clean Gutters")).unwrap();
        let b = fingerprint_input(&input("How to Clean Gutters")).unwrap();
        let c = fingerprint_input(&input("Gutter Cleaning Guide")).unwrap();

        assert!(a.starts_with("sha256:"));
        assert_eq!(a.len(), "sha256:".len() + 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

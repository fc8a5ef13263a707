//! Tuned scoring constants for the gate.
//!
//! The weights and cut-offs are product-tuned values. They are kept
//! configurable rather than hard-coded so a deployment can adjust them
//! without touching evaluator code.

use serde::{Deserialize, Serialize};

/// Blend weights for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_serp_weight")]
    pub serp_strength: f64,

    #[serde(default = "default_aeo_weight")]
    pub aeo_coverage: f64,

    #[serde(default = "default_credibility_weight")]
    pub credibility: f64,

    #[serde(default = "default_intent_weight")]
    pub intent_match: f64,

    /// Applied to (100 - risk)
    #[serde(default = "default_risk_weight")]
    pub risk: f64,
}

fn default_serp_weight() -> f64 {
    0.25
}
fn default_aeo_weight() -> f64 {
    0.20
}
fn default_credibility_weight() -> f64 {
    0.25
}
fn default_intent_weight() -> f64 {
    0.20
}
fn default_risk_weight() -> f64 {
    0.10
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            serp_strength: default_serp_weight(),
            aeo_coverage: default_aeo_weight(),
            credibility: default_credibility_weight(),
            intent_match: default_intent_weight(),
            risk: default_risk_weight(),
        }
    }
}

/// Thresholds used by the evaluators and the gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    #[serde(default)]
    pub weights: ScoreWeights,

    /// Minimum overall score for PrePublish approval (default: 60)
    #[serde(default = "default_prepublish_min_score")]
    pub prepublish_min_score: f64,

    /// Titles scoring below this are regenerated (default: 70)
    #[serde(default = "default_title_rewrite_below")]
    pub title_rewrite_below: u8,

    /// Minimum title score to count as valid (default: 60)
    #[serde(default = "default_title_valid_min")]
    pub title_valid_min: u8,

    /// Accepted title length in characters (default: 30..=60)
    #[serde(default = "default_title_min_chars")]
    pub title_min_chars: usize,
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,

    /// Question categories that must be covered (default: 4 of 7)
    #[serde(default = "default_aeo_min_covered")]
    pub aeo_min_covered: usize,

    /// Distinct trust signals required (default: 2)
    #[serde(default = "default_credibility_min_signals")]
    pub credibility_min_signals: usize,

    /// Minimum intent signal score (default: 50)
    #[serde(default = "default_intent_min_score")]
    pub intent_min_score: u8,

    /// Minimum outline alignment score (default: 50)
    #[serde(default = "default_outline_alignment_min")]
    pub outline_alignment_min: u8,

    /// Accepted meta description length in characters (default: 120..=160)
    #[serde(default = "default_meta_min_chars")]
    pub meta_min_chars: usize,
    #[serde(default = "default_meta_max_chars")]
    pub meta_max_chars: usize,
}

fn default_prepublish_min_score() -> f64 {
    60.0
}
fn default_title_rewrite_below() -> u8 {
    70
}
fn default_title_valid_min() -> u8 {
    60
}
fn default_title_min_chars() -> usize {
    30
}
fn default_title_max_chars() -> usize {
    60
}
fn default_aeo_min_covered() -> usize {
    4
}
fn default_credibility_min_signals() -> usize {
    2
}
fn default_intent_min_score() -> u8 {
    50
}
fn default_outline_alignment_min() -> u8 {
    50
}
fn default_meta_min_chars() -> usize {
    120
}
fn default_meta_max_chars() -> usize {
    160
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            prepublish_min_score: default_prepublish_min_score(),
            title_rewrite_below: default_title_rewrite_below(),
            title_valid_min: default_title_valid_min(),
            title_min_chars: default_title_min_chars(),
            title_max_chars: default_title_max_chars(),
            aeo_min_covered: default_aeo_min_covered(),
            credibility_min_signals: default_credibility_min_signals(),
            intent_min_score: default_intent_min_score(),
            outline_alignment_min: default_outline_alignment_min(),
            meta_min_chars: default_meta_min_chars(),
            meta_max_chars: default_meta_max_chars(),
        }
    }
}

impl ScoreWeights {
    /// Weighted blend of the five dimension scores
    pub fn blend(&self, scores: &crate::domain::AuditScores) -> f64 {
        self.serp_strength * f64::from(scores.serp_strength)
            + self.aeo_coverage * f64::from(scores.aeo_coverage)
            + self.credibility * f64::from(scores.credibility)
            + self.intent_match * f64::from(scores.intent_match)
            + self.risk * (100.0 - f64::from(scores.risk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuditScores;

    #[test]
    fn test_default_thresholds() {
        let t = GateThresholds::default();
        assert_eq!(t.prepublish_min_score, 60.0);
        assert_eq!(t.title_rewrite_below, 70);
        assert_eq!(t.aeo_min_covered, 4);
        assert_eq!(t.credibility_min_signals, 2);
        assert_eq!((t.meta_min_chars, t.meta_max_chars), (120, 160));
    }

    #[test]
    fn test_blend_inverts_risk() {
        let weights = ScoreWeights::default();
        let perfect = AuditScores {
            serp_strength: 100,
            aeo_coverage: 100,
            credibility: 100,
            intent_match: 100,
            risk: 0,
        };
        assert!((weights.blend(&perfect) - 100.0).abs() < 1e-9);

        let risky = AuditScores { risk: 100, ..perfect };
        assert!((weights.blend(&risky) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let t: GateThresholds = serde_yaml::from_str("prepublish_min_score: 75\n").unwrap();
        assert_eq!(t.prepublish_min_score, 75.0);
        assert_eq!(t.title_valid_min, 60);
        assert_eq!(t.weights, ScoreWeights::default());
    }
}

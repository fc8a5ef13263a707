//! Independent quality evaluators.
//!
//! Each evaluator is a pure function over the proposal and its context:
//! - Title: scoring and template rewrite
//! - Intent: signal coverage and role/intent mismatches
//! - AEO: question coverage and outline synthesis
//! - Credibility: trust signals and injections
//! - Risk: compliance categories and risky claims
//!
//! Evaluators never call each other; the gate merges their reports.

pub mod aeo;
pub mod credibility;
pub mod intent;
pub mod risk;
pub mod text;
pub mod title;

pub use aeo::{
    check_aeo_coverage, enhance_outline_for_aeo, outline_from_proposal, required_questions,
    AeoCoverage, QuestionType,
};
pub use credibility::{evaluate_credibility, CredibilityEvaluation, SignalCheck};
pub use intent::{validate_intent, validate_outline_intent, IntentValidation, OutlineAlignment};
pub use risk::{scan_risk, FlaggedPhrase, RiskCategory, RiskLevel, RiskScan, ScanSource, Severity};
pub use title::{evaluate_title, regenerate_title, TitleAnalysis};

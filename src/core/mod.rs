//! Core gate logic.
//!
//! This module contains:
//! - Orchestrator: the AuditGate and its free-function entry points
//! - Decision: result, verdict and report types
//! - Thresholds: tuned scoring constants
//! - Limits: boundary validation of gate input

pub mod decision;
pub mod limits;
pub mod orchestrator;
pub mod thresholds;

// Re-export commonly used types
pub use decision::{fingerprint_input, AuditReport, ContentIntelGateResult, GateAnalysis, GateVerdict};
pub use limits::{InputLimits, InputViolation};
pub use orchestrator::{get_enhanced_outline, rewrite_title, run_audit_gate, would_pass_gate, AuditGate};
pub use thresholds::{GateThresholds, ScoreWeights};

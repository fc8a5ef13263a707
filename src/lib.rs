//! contentgate - Content-quality audit gate for SEO/AEO page proposals
//!
//! Takes a proposed article skeleton (title, headings, focus keyphrase,
//! meta description) plus the page's declared role and search intent,
//! scores it on five independent dimensions, rewrites the weak parts and
//! renders an approve/block decision.
//!
//! # Architecture
//!
//! The gate is a pure, synchronous computation:
//! - Five evaluators inspect the same input and never call each other
//! - The gate merges their findings and routes them by mode
//! - Planning mode advises; PrePublish mode enforces
//!
//! # Modules
//!
//! - `evaluators`: Title, intent, AEO, credibility and risk checks
//! - `core`: The AuditGate, thresholds, input limits and result types
//! - `domain`: Data structures (contexts, proposals, outlines, scores)
//! - `config`: Threshold and limit discovery
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Audit a proposal in enforcing mode
//! contentgate audit --input page.yaml --mode pre-publish
//!
//! # Just the verdict
//! cat page.json | contentgate check
//!
//! # The AEO outline as markdown
//! contentgate outline --input page.yaml
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod evaluators;

// Re-export main types at crate root for convenience
pub use crate::core::{
    get_enhanced_outline, rewrite_title, run_audit_gate, would_pass_gate, AuditGate, AuditReport,
    ContentIntelGateResult, GateThresholds, GateVerdict, InputLimits, InputViolation,
};
pub use crate::domain::{
    ApprovedOutline, AuditGateInput, GateMode, PageRole, ProposedContent, SearchIntent,
    TaskContext, UserContext, VisionContext,
};

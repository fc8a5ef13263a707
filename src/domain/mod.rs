//! Domain types for the content gate.
//!
//! This module contains the core data structures:
//! - Context: task, user, vision and site inputs
//! - Content: proposed and approved artifacts
//! - Audit: scores, injections and compliance values

pub mod audit;
pub mod content;
pub mod context;

// Re-export commonly used types
pub use audit::{
    AuditScores, ComplianceCategory, ComplianceResult, CredibilityInjection, GateMode,
    PlacementHint, Strength, TrustSignal,
};
pub use content::{ApprovedOutline, AuditGateInput, OutlineSection, ProposedContent, SectionIntent};
pub use context::{
    EvidenceStrength, ExperienceFacts, InternalLink, PageRole, ReviewSnippet, SearchIntent,
    SiteContext, TaskContext, UserContext, VisionContext,
};

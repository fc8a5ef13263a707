//! Proposed and approved content artifacts.
//!
//! The gate reads a ProposedContent and produces new approved artifacts;
//! it never edits the proposal in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::context::{SiteContext, TaskContext, UserContext, VisionContext};

/// Candidate article skeleton under audit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposedContent {
    /// Working title
    pub title: String,

    /// Ordered H2 headings
    #[serde(default)]
    pub headings: Vec<String>,

    /// Target keyphrase
    #[serde(default)]
    pub focus_keyphrase: String,

    #[serde(default)]
    pub meta_description: String,
}

/// Narrative role of an outline section.
///
/// Declaration order is the reading order used when sections are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIntent {
    Define,
    Audience,
    Timing,
    Process,
    Investment,
    Warnings,
    Inform,
    Action,
}

impl fmt::Display for SectionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionIntent::Define => "define",
            SectionIntent::Audience => "audience",
            SectionIntent::Timing => "timing",
            SectionIntent::Process => "process",
            SectionIntent::Investment => "investment",
            SectionIntent::Warnings => "warnings",
            SectionIntent::Inform => "inform",
            SectionIntent::Action => "action",
        };
        write!(f, "{}", name)
    }
}

/// A single H2 section of an approved outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub heading: String,
    pub intent: SectionIntent,
    #[serde(default)]
    pub subheadings: Vec<String>,
}

impl OutlineSection {
    pub fn new(heading: impl Into<String>, intent: SectionIntent) -> Self {
        Self {
            heading: heading.into(),
            intent,
            subheadings: Vec::new(),
        }
    }
}

/// Heading structure the article should be written against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedOutline {
    pub h1: String,
    pub sections: Vec<OutlineSection>,
}

impl ApprovedOutline {
    /// All section headings, in order
    pub fn headings(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.heading.clone()).collect()
    }

    /// Whether any section carries the given intent
    pub fn has_intent(&self, intent: SectionIntent) -> bool {
        self.sections.iter().any(|s| s.intent == intent)
    }

    /// Render as a markdown heading skeleton
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n", self.h1);
        for section in &self.sections {
            out.push_str(&format!("\n## {}\n", section.heading));
            for sub in &section.subheadings {
                out.push_str(&format!("### {}\n", sub));
            }
        }
        out
    }
}

/// Everything the gate needs for one evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditGateInput {
    pub task_context: TaskContext,

    #[serde(default)]
    pub site_context: SiteContext,

    #[serde(default)]
    pub user_context: UserContext,

    #[serde(default)]
    pub vision_context: Option<VisionContext>,

    pub proposed: ProposedContent,
}

impl AuditGateInput {
    /// Build an input with default site/user context and no vision summary
    pub fn new(task_context: TaskContext, proposed: ProposedContent) -> Self {
        Self {
            task_context,
            site_context: SiteContext::default(),
            user_context: UserContext::default(),
            vision_context: None,
            proposed,
        }
    }

    pub fn with_user_context(mut self, user_context: UserContext) -> Self {
        self.user_context = user_context;
        self
    }

    pub fn with_vision_context(mut self, vision_context: VisionContext) -> Self {
        self.vision_context = Some(vision_context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_intent_priority_order() {
        assert!(SectionIntent::Define < SectionIntent::Audience);
        assert!(SectionIntent::Investment < SectionIntent::Warnings);
        assert!(SectionIntent::Inform < SectionIntent::Action);
    }

    #[test]
    fn test_outline_markdown() {
        let mut section = OutlineSection::new("How It Works", SectionIntent::Process);
        section.subheadings.push("Step 1: Consultation".to_string());
        let outline = ApprovedOutline {
            h1: "Garden Design in York".to_string(),
            sections: vec![section, OutlineSection::new("Book Now", SectionIntent::Action)],
        };

        let md = outline.to_markdown();
        assert!(md.starts_with("# Garden Design in York\n"));
        assert!(md.contains("## How It Works\n### Step 1: Consultation\n"));
        assert!(md.ends_with("## Book Now\n"));
    }

    #[test]
    fn test_input_parses_with_optional_sections_missing() {
        let yaml = r#"
task_context:
  role: money
  intent: buy
  primary_service: roof repair
proposed:
  title: Roof Repair Prices
  headings: ["Pricing"]
"#;
        let input: AuditGateInput = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.task_context.primary_service, "roof repair");
        assert!(input.vision_context.is_none());
        assert!(input.site_context.sitemap.is_empty());
        assert_eq!(input.proposed.meta_description, "");
    }
}

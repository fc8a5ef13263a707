//! Answer-engine coverage.
//!
//! Checks the proposal against seven canonical question categories and,
//! when coverage is too thin, synthesizes an outline that answers them.
//!
//! Outline synthesis never edits the proposal: it builds fresh sections,
//! deduplicates by case-insensitive heading, and sorts by section intent so
//! the article reads define → audience → timing → process → investment →
//! warnings → inform → action regardless of insertion order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::thresholds::GateThresholds;
use crate::domain::{ApprovedOutline, OutlineSection, ProposedContent, SectionIntent, TaskContext};

use super::text::{contains_any_term, heading_starts_with_any, Placeholders, Snapshot};

/// Canonical answer-engine question categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    What,
    Who,
    When,
    How,
    Cost,
    Mistakes,
    Next,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::What => "what",
            QuestionType::Who => "who",
            QuestionType::When => "when",
            QuestionType::How => "how",
            QuestionType::Cost => "cost",
            QuestionType::Mistakes => "mistakes",
            QuestionType::Next => "next",
        };
        write!(f, "{}", name)
    }
}

/// Detector and synthesis template for one question category
struct QuestionRule {
    question: QuestionType,
    required: bool,
    /// Covered if the combined text contains any of these
    keywords: &'static [&'static str],
    /// Covered if any heading starts with any of these
    heading_prefixes: &'static [&'static str],
    label: &'static str,
    section_intent: SectionIntent,
    heading: &'static str,
    subheadings: &'static [&'static str],
}

const QUESTION_RULES: &[QuestionRule] = &[
    QuestionRule {
        question: QuestionType::What,
        required: true,
        keywords: &["what is", "what are", "definition", "meaning", "explained"],
        heading_prefixes: &["what ", "overview"],
        label: "What is it?",
        section_intent: SectionIntent::Define,
        heading: "What Is {Service}?",
        subheadings: &["What's Included", "How {Service} Differs From the Alternatives"],
    },
    QuestionRule {
        question: QuestionType::Who,
        required: false,
        keywords: &["who is", "who needs", "who should", "is it for", "ideal for", "suitable for"],
        heading_prefixes: &["who ", "is it right", "is this for"],
        label: "Who is it for?",
        section_intent: SectionIntent::Audience,
        heading: "Who Is {Service} For?",
        subheadings: &["Ideal Clients", "When It May Not Be the Right Fit"],
    },
    QuestionRule {
        question: QuestionType::When,
        required: false,
        keywords: &["when to", "when should", "timeline", "how long", "timing", "best time"],
        heading_prefixes: &["when ", "how long"],
        label: "When should you do it?",
        section_intent: SectionIntent::Timing,
        heading: "When Should You Book {Service}?",
        subheadings: &["Typical Timeline", "Seasonal Considerations"],
    },
    QuestionRule {
        question: QuestionType::How,
        required: true,
        keywords: &["how it works", "how to", "how does", "process", "step-by-step", "steps"],
        heading_prefixes: &["how ", "process", "step", "our process"],
        label: "How does it work?",
        section_intent: SectionIntent::Process,
        heading: "How {Service} Works{in_location}",
        subheadings: &[
            "Step 1: Initial Consultation",
            "Step 2: Planning",
            "Step 3: Delivery",
        ],
    },
    QuestionRule {
        question: QuestionType::Cost,
        required: true,
        keywords: &["cost", "costs", "price", "prices", "pricing", "fees", "budget", "investment", "how much"],
        heading_prefixes: &["how much", "cost", "pricing", "price"],
        label: "How much does it cost?",
        section_intent: SectionIntent::Investment,
        heading: "How Much Does {Service} Cost{in_location}?",
        subheadings: &["What Affects the Price", "Typical Price Ranges"],
    },
    QuestionRule {
        question: QuestionType::Mistakes,
        required: false,
        keywords: &["mistake", "mistakes", "avoid", "pitfalls", "red flags", "warning signs", "risks"],
        heading_prefixes: &["common mistakes", "avoid", "mistakes"],
        label: "What mistakes should you avoid?",
        section_intent: SectionIntent::Warnings,
        heading: "Common {Service} Mistakes to Avoid",
        subheadings: &["Red Flags to Watch For", "How to Choose the Right Provider"],
    },
    QuestionRule {
        question: QuestionType::Next,
        required: true,
        keywords: &["next step", "next steps", "get started", "book", "contact", "get in touch", "enquire", "call us"],
        heading_prefixes: &["next", "book", "get started", "contact"],
        label: "What happens next?",
        section_intent: SectionIntent::Action,
        heading: "Next Steps: Getting Started With {Service}",
        subheadings: &["How to Book", "What to Prepare"],
    },
];

/// Keyword sniffing for the intent of an existing heading, first match wins
const HEADING_INTENTS: &[(SectionIntent, &[&str])] = &[
    (SectionIntent::Investment, &["cost", "costs", "price", "prices", "pricing", "fee", "fees", "budget", "how much", "investment"]),
    (SectionIntent::Timing, &["when", "timeline", "how long", "timing"]),
    (SectionIntent::Warnings, &["mistake", "mistakes", "avoid", "risk", "risks", "warning", "red flags"]),
    (SectionIntent::Action, &["book", "contact", "next", "get started", "enquire", "get in touch", "quote"]),
    (SectionIntent::Define, &["what", "overview", "definition", "explained"]),
    (SectionIntent::Audience, &["who", "for you", "ideal", "suitable"]),
    (SectionIntent::Process, &["how", "process", "step", "steps", "works"]),
];

/// Infer a section intent from heading text
pub fn infer_section_intent(heading: &str) -> SectionIntent {
    let lower = heading.to_lowercase();
    HEADING_INTENTS
        .iter()
        .find(|(_, terms)| contains_any_term(&lower, terms))
        .map(|(intent, _)| *intent)
        .unwrap_or(SectionIntent::Inform)
}

fn rule_covered(rule: &QuestionRule, snapshot: &Snapshot) -> bool {
    contains_any_term(&snapshot.text, rule.keywords)
        || heading_starts_with_any(&snapshot.headings, rule.heading_prefixes)
}

/// Whether a single question category is covered by the snapshot
pub fn is_covered(question: QuestionType, snapshot: &Snapshot) -> bool {
    QUESTION_RULES
        .iter()
        .find(|r| r.question == question)
        .is_some_and(|rule| rule_covered(rule, snapshot))
}

/// Partition of the seven categories into covered and missing
pub fn coverage(snapshot: &Snapshot) -> (Vec<QuestionType>, Vec<QuestionType>) {
    QUESTION_RULES
        .iter()
        .map(|r| r.question)
        .partition(|q| is_covered(*q, snapshot))
}

fn is_required(question: QuestionType) -> bool {
    QUESTION_RULES
        .iter()
        .any(|r| r.question == question && r.required)
}

/// Result of the AEO coverage check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeoCoverage {
    pub is_valid: bool,
    pub score: u8,
    pub covered: Vec<QuestionType>,
    pub missing: Vec<QuestionType>,
    /// Missing required categories
    pub blockers: Vec<String>,
    pub suggestions: Vec<String>,
    /// Replacement outline, present only when coverage was insufficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesized_outline: Option<ApprovedOutline>,
}

/// Check the proposal's coverage and synthesize an outline if it falls short
pub fn check_aeo_coverage(
    proposed: &ProposedContent,
    task: &TaskContext,
    thresholds: &GateThresholds,
) -> AeoCoverage {
    let snapshot = Snapshot::from_proposal(proposed);
    let (covered, missing) = coverage(&snapshot);
    let total = QUESTION_RULES.len();
    let score = ((covered.len() as f64 / total as f64) * 100.0).round() as u8;
    let is_valid = covered.len() >= thresholds.aeo_min_covered;

    let mut blockers = Vec::new();
    let mut suggestions = Vec::new();
    for rule in QUESTION_RULES.iter().filter(|r| missing.contains(&r.question)) {
        if rule.required {
            blockers.push(format!(
                "Missing required answer coverage: \"{}\" ({})",
                rule.label, rule.question
            ));
        } else {
            suggestions.push(format!(
                "Consider answering \"{}\" to improve answer-engine coverage",
                rule.label
            ));
        }
    }
    if !is_valid && blockers.is_empty() {
        blockers.push(format!(
            "Answer coverage too low: {} of {} question types covered, {} required",
            covered.len(),
            total,
            thresholds.aeo_min_covered
        ));
    }

    let synthesized_outline = if is_valid {
        None
    } else {
        debug!(covered = covered.len(), "Synthesizing AEO outline");
        Some(synthesize_outline(proposed, task, &missing))
    };

    AeoCoverage {
        is_valid,
        score,
        covered,
        missing,
        blockers,
        suggestions,
        synthesized_outline,
    }
}

fn template_section(rule: &QuestionRule, placeholders: &Placeholders) -> OutlineSection {
    OutlineSection {
        heading: placeholders.render(rule.heading),
        intent: rule.section_intent,
        subheadings: rule
            .subheadings
            .iter()
            .map(|s| placeholders.render(s))
            .collect(),
    }
}

/// Drop repeated headings (case-insensitive, first kept), then sort by intent
fn dedupe_and_order(sections: Vec<OutlineSection>) -> Vec<OutlineSection> {
    let mut seen = HashSet::new();
    let mut unique: Vec<OutlineSection> = sections
        .into_iter()
        .filter(|s| seen.insert(s.heading.trim().to_lowercase()))
        .collect();
    // stable: sections sharing an intent keep their relative order
    unique.sort_by_key(|s| s.intent);
    unique
}

/// Existing headings plus one templated section per missing category
fn synthesize_outline(
    proposed: &ProposedContent,
    task: &TaskContext,
    missing: &[QuestionType],
) -> ApprovedOutline {
    let placeholders = Placeholders::new(&task.primary_service, task.location());

    let mut sections: Vec<OutlineSection> = proposed
        .headings
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .map(|h| OutlineSection::new(h, infer_section_intent(h)))
        .collect();

    sections.extend(
        QUESTION_RULES
            .iter()
            .filter(|r| missing.contains(&r.question))
            .map(|r| template_section(r, &placeholders)),
    );

    ApprovedOutline {
        h1: proposed.title.trim().to_string(),
        sections: dedupe_and_order(sections),
    }
}

/// Wrap the proposal's headings 1:1; the last one is the call to action
pub fn outline_from_proposal(proposed: &ProposedContent) -> ApprovedOutline {
    let headings: Vec<&str> = proposed
        .headings
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .collect();
    let last = headings.len().saturating_sub(1);

    ApprovedOutline {
        h1: proposed.title.trim().to_string(),
        sections: headings
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let intent = if i == last {
                    SectionIntent::Action
                } else {
                    SectionIntent::Inform
                };
                OutlineSection::new(*h, intent)
            })
            .collect(),
    }
}

/// Add required-category sections to an outline that lacks coverage.
///
/// An outline that already meets the coverage threshold is returned as-is,
/// so repeated calls are stable.
pub fn enhance_outline_for_aeo(
    outline: &ApprovedOutline,
    task: &TaskContext,
    thresholds: &GateThresholds,
) -> ApprovedOutline {
    let snapshot = Snapshot::from_outline(outline);
    let (covered, missing) = coverage(&snapshot);
    if covered.len() >= thresholds.aeo_min_covered {
        return outline.clone();
    }

    let placeholders = Placeholders::new(&task.primary_service, task.location());
    let mut sections = outline.sections.clone();
    sections.extend(
        QUESTION_RULES
            .iter()
            .filter(|r| r.required && missing.contains(&r.question))
            .map(|r| template_section(r, &placeholders)),
    );

    debug!(
        added = sections.len() - outline.sections.len(),
        "Enhanced outline with required AEO sections"
    );

    ApprovedOutline {
        h1: outline.h1.clone(),
        sections: dedupe_and_order(sections),
    }
}

/// Question categories whose absence is a blocker
pub fn required_questions() -> Vec<QuestionType> {
    QUESTION_RULES
        .iter()
        .map(|r| r.question)
        .filter(|q| is_required(*q))
        .collect()
}

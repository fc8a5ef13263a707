//! Intent validation.
//!
//! Checks that the proposal carries the signals its declared search intent
//! needs, flags role/intent mismatches, and separately checks that an
//! approved outline still serves the intent.

use serde::{Deserialize, Serialize};

use crate::core::thresholds::GateThresholds;
use crate::domain::{ApprovedOutline, PageRole, ProposedContent, SearchIntent, SectionIntent, TaskContext};

use super::text::{contains_any_term, mentions_service, Snapshot};

/// A named signal and the terms that evidence it
struct SignalRule {
    name: &'static str,
    terms: &'static [&'static str],
    suggestion: &'static str,
}

/// The four signals each intent requires
struct IntentRequirements {
    intent: SearchIntent,
    signals: [SignalRule; 4],
    /// Vocabulary expected in at least one heading
    heading_terms: &'static [&'static str],
}

const INTENT_REQUIREMENTS: &[IntentRequirements] = &[
    IntentRequirements {
        intent: SearchIntent::Buy,
        signals: [
            SignalRule {
                name: "pricing",
                terms: &[
                    "price", "prices", "pricing", "cost", "costs", "fees", "quote", "packages",
                    "rates", "how much",
                ],
                suggestion: "Show pricing or a starting price so buyers can self-qualify",
            },
            SignalRule {
                name: "call_to_action",
                terms: &[
                    "book", "booking", "call", "contact", "enquire", "get a quote", "get started",
                    "request", "reserve", "schedule",
                ],
                suggestion: "Add a clear call to action (book, call, request a quote)",
            },
            SignalRule {
                name: "service_scope",
                terms: &[
                    "what's included", "what is included", "included", "services", "packages",
                    "how it works", "process", "options", "coverage",
                ],
                suggestion: "Spell out what the service includes",
            },
            SignalRule {
                name: "availability",
                terms: &[
                    "availability", "available", "date", "dates", "same-day", "next steps",
                    "near", "areas", "today", "this week",
                ],
                suggestion: "Mention availability, lead times or service areas",
            },
        ],
        heading_terms: &[
            "pricing", "price", "prices", "cost", "costs", "book", "packages", "how it works",
            "get a quote", "contact",
        ],
    },
    IntentRequirements {
        intent: SearchIntent::Compare,
        signals: [
            SignalRule {
                name: "comparison",
                terms: &[
                    "vs", "versus", "compare", "compared", "comparison", "difference",
                    "differences", "alternatives",
                ],
                suggestion: "Name the options being compared explicitly",
            },
            SignalRule {
                name: "decision_criteria",
                terms: &[
                    "criteria", "factors", "consider", "what to look for", "how to choose",
                    "choosing", "features", "cost", "price",
                ],
                suggestion: "List the criteria readers should compare on",
            },
            SignalRule {
                name: "pros_and_cons",
                terms: &[
                    "pros", "cons", "advantages", "disadvantages", "benefits", "drawbacks",
                    "trade-offs",
                ],
                suggestion: "Add pros and cons for each option",
            },
            SignalRule {
                name: "recommendation",
                terms: &[
                    "best", "recommend", "recommended", "verdict", "which is right", "our pick",
                    "best for",
                ],
                suggestion: "Close with a recommendation or verdict",
            },
        ],
        heading_terms: &[
            "vs", "versus", "compare", "comparison", "difference", "pros", "cons", "which",
        ],
    },
    IntentRequirements {
        intent: SearchIntent::Learn,
        signals: [
            SignalRule {
                name: "definition",
                terms: &["what is", "what are", "definition", "meaning", "explained", "overview"],
                suggestion: "Define the topic early in plain language",
            },
            SignalRule {
                name: "explanation",
                terms: &["how does", "how it works", "why", "because", "works"],
                suggestion: "Explain how or why it works",
            },
            SignalRule {
                name: "practical_steps",
                terms: &["how to", "steps", "step", "guide", "checklist", "tips"],
                suggestion: "Give the reader practical steps or tips",
            },
            SignalRule {
                name: "examples",
                terms: &["example", "examples", "for instance", "case study", "such as", "real-world"],
                suggestion: "Include a worked example",
            },
        ],
        heading_terms: &["what", "how", "why", "guide", "steps", "tips"],
    },
    IntentRequirements {
        intent: SearchIntent::Trust,
        signals: [
            SignalRule {
                name: "experience",
                terms: &[
                    "years", "experience", "experienced", "since", "established", "clients",
                    "projects",
                ],
                suggestion: "State how long you have been doing this and for whom",
            },
            SignalRule {
                name: "proof",
                terms: &[
                    "reviews", "testimonials", "case study", "case studies", "rated", "awards",
                    "accredited", "certified",
                ],
                suggestion: "Add reviews, case studies or accreditations",
            },
            SignalRule {
                name: "reassurance",
                terms: &[
                    "peace of mind", "no obligation", "insured", "fully insured", "safe",
                    "trusted", "aftercare", "support",
                ],
                suggestion: "Reassure the reader (insurance, aftercare, no-obligation quotes)",
            },
            SignalRule {
                name: "transparency",
                terms: &[
                    "process", "how we work", "pricing", "transparent", "what to expect", "honest",
                    "upfront",
                ],
                suggestion: "Be transparent about process and pricing",
            },
        ],
        heading_terms: &[
            "reviews", "testimonials", "about", "experience", "credentials", "why choose",
            "our story", "case study", "case studies",
        ],
    },
];

/// Which intents make sense for each page role
const ROLE_INTENTS: &[(PageRole, &[SearchIntent])] = &[
    (
        PageRole::Money,
        &[SearchIntent::Buy, SearchIntent::Compare, SearchIntent::Trust],
    ),
    (PageRole::Trust, &[SearchIntent::Trust, SearchIntent::Compare]),
    (PageRole::Support, &[SearchIntent::Learn, SearchIntent::Compare]),
    (
        PageRole::Authority,
        &[SearchIntent::Learn, SearchIntent::Compare, SearchIntent::Trust],
    ),
];

fn requirements_for(intent: SearchIntent) -> &'static IntentRequirements {
    INTENT_REQUIREMENTS
        .iter()
        .find(|r| r.intent == intent)
        .unwrap_or(&INTENT_REQUIREMENTS[0])
}

fn allowed_intents(role: PageRole) -> &'static [SearchIntent] {
    ROLE_INTENTS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, intents)| *intents)
        .unwrap_or(&[])
}

/// Result of validating a proposal against its intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentValidation {
    pub is_valid: bool,
    pub score: u8,
    pub matched_signals: Vec<String>,
    pub missing_signals: Vec<String>,
    /// Role/intent mismatches; any entry invalidates the proposal
    pub mismatches: Vec<String>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub blockers: Vec<String>,
}

/// Validate the proposal's title, headings and meta against its intent
pub fn validate_intent(
    proposed: &ProposedContent,
    task: &TaskContext,
    thresholds: &GateThresholds,
) -> IntentValidation {
    let snapshot = Snapshot::from_proposal(proposed);
    let requirements = requirements_for(task.intent);

    let mut matched_signals = Vec::new();
    let mut missing_signals = Vec::new();
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    for rule in &requirements.signals {
        if contains_any_term(&snapshot.text, rule.terms) {
            matched_signals.push(rule.name.to_string());
        } else {
            missing_signals.push(rule.name.to_string());
            issues.push(format!("Missing {} signal for {} intent", rule.name, task.intent));
            suggestions.push(rule.suggestion.to_string());
        }
    }

    let score = (matched_signals.len() * 100 / requirements.signals.len()) as u8;

    let mut mismatches = Vec::new();
    let allowed = allowed_intents(task.role);
    if !allowed.contains(&task.intent) {
        mismatches.push(format!(
            "Intent mismatch: {} intent declared on a {} page",
            task.intent, task.role
        ));
        let names: Vec<String> = allowed.iter().map(|i| i.to_string()).collect();
        suggestions.push(format!(
            "Use one of [{}] intents for a {} page, or change the page role",
            names.join(", "),
            task.role
        ));
    }

    let has_intent_heading = snapshot
        .headings
        .iter()
        .any(|h| contains_any_term(h, requirements.heading_terms));
    if !has_intent_heading {
        issues.push(format!("No heading speaks to {} intent", task.intent));
        suggestions.push(format!(
            "Add a heading using language like \"{}\"",
            requirements.heading_terms[0]
        ));
    }

    let is_valid = score >= thresholds.intent_min_score && mismatches.is_empty();
    let mut blockers = mismatches.clone();
    if score < thresholds.intent_min_score {
        blockers.push(format!(
            "Content does not match declared {} intent (signal score {}, minimum {})",
            task.intent, score, thresholds.intent_min_score
        ));
    }

    IntentValidation {
        is_valid,
        score,
        matched_signals,
        missing_signals,
        mismatches,
        issues,
        suggestions,
        blockers,
    }
}

/// One coarse structural check of an outline
enum OutlineCheck {
    HasSection(SectionIntent),
    HeadingMentions(&'static [&'static str]),
    EndsWithAction,
    H1MentionsService,
}

impl OutlineCheck {
    fn passes(&self, outline: &ApprovedOutline, snapshot: &Snapshot, task: &TaskContext) -> bool {
        match self {
            OutlineCheck::HasSection(intent) => outline.has_intent(*intent),
            OutlineCheck::HeadingMentions(terms) => {
                snapshot.headings.iter().any(|h| contains_any_term(h, terms))
            }
            OutlineCheck::EndsWithAction => outline
                .sections
                .last()
                .is_some_and(|s| s.intent == SectionIntent::Action),
            OutlineCheck::H1MentionsService => mentions_service(&snapshot.title, &task.primary_service),
        }
    }

    fn describe(&self) -> String {
        match self {
            OutlineCheck::HasSection(intent) => format!("Outline has no {} section", intent),
            OutlineCheck::HeadingMentions(terms) => format!(
                "No outline heading uses intent vocabulary (e.g. \"{}\")",
                terms.first().copied().unwrap_or_default()
            ),
            OutlineCheck::EndsWithAction => "Outline does not end with a call-to-action section".to_string(),
            OutlineCheck::H1MentionsService => "Outline H1 does not mention the primary service".to_string(),
        }
    }
}

const COMPARE_HEADING_TERMS: &[&str] = &[
    "vs", "versus", "compare", "compared", "comparison", "difference", "differences", "pros", "cons",
];

const TRUST_HEADING_TERMS: &[&str] = &[
    "reviews", "testimonials", "experience", "credentials", "why choose", "case study", "case studies",
    "accredited",
];

const OUTLINE_CHECKS: &[(SearchIntent, [OutlineCheck; 4])] = &[
    (
        SearchIntent::Buy,
        [
            OutlineCheck::HasSection(SectionIntent::Investment),
            OutlineCheck::HasSection(SectionIntent::Process),
            OutlineCheck::EndsWithAction,
            OutlineCheck::H1MentionsService,
        ],
    ),
    (
        SearchIntent::Compare,
        [
            OutlineCheck::HeadingMentions(COMPARE_HEADING_TERMS),
            OutlineCheck::HasSection(SectionIntent::Investment),
            OutlineCheck::HasSection(SectionIntent::Warnings),
            OutlineCheck::EndsWithAction,
        ],
    ),
    (
        SearchIntent::Learn,
        [
            OutlineCheck::HasSection(SectionIntent::Define),
            OutlineCheck::HasSection(SectionIntent::Process),
            OutlineCheck::H1MentionsService,
            OutlineCheck::EndsWithAction,
        ],
    ),
    (
        SearchIntent::Trust,
        [
            OutlineCheck::HeadingMentions(TRUST_HEADING_TERMS),
            OutlineCheck::HasSection(SectionIntent::Process),
            OutlineCheck::H1MentionsService,
            OutlineCheck::EndsWithAction,
        ],
    ),
];

/// Alignment of an outline with the declared intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineAlignment {
    pub aligned: bool,
    pub score: u8,
    pub issues: Vec<String>,
}

/// Coarse four-point check that an outline still serves the intent
pub fn validate_outline_intent(
    outline: &ApprovedOutline,
    task: &TaskContext,
    thresholds: &GateThresholds,
) -> OutlineAlignment {
    let snapshot = Snapshot::from_outline(outline);
    let checks = OUTLINE_CHECKS
        .iter()
        .find(|(intent, _)| *intent == task.intent)
        .map(|(_, checks)| checks)
        .unwrap_or(&OUTLINE_CHECKS[0].1);

    let mut passed = 0usize;
    let mut issues = Vec::new();
    for check in checks {
        if check.passes(outline, &snapshot, task) {
            passed += 1;
        } else {
            issues.push(check.describe());
        }
    }

    let score = (passed * 25) as u8;
    OutlineAlignment {
        aligned: score >= thresholds.outline_alignment_min,
        score,
        issues,
    }
}

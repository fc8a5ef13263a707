//! Title intelligence: scores the proposed title and regenerates weak ones.
//!
//! Scoring starts at 100 and subtracts fixed penalties. Titles scoring
//! below the rewrite threshold are replaced by an intent-specific template.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::thresholds::GateThresholds;
use crate::domain::{ProposedContent, SearchIntent, TaskContext, UserContext};

use super::text::{char_len, contains_term, first_term, mentions_service, Placeholders};

const GENERIC_PHRASE_PENALTY: i32 = 20;
const MISSING_SERVICE_PENALTY: i32 = 15;
const MISSING_LOCATION_PENALTY: i32 = 10;
const INTENT_CLARITY_PENALTY: i32 = 10;
const LENGTH_PENALTY: i32 = 5;
const MISSING_OUTCOME_PENALTY: i32 = 10;

/// Corporate filler that says nothing to a searcher
const GENERIC_PHRASES: &[&str] = &[
    "welcome to",
    "your trusted partner",
    "one-stop shop",
    "one stop shop",
    "best in class",
    "world-class",
    "world class",
    "cutting-edge",
    "cutting edge",
    "industry-leading",
    "industry leading",
    "leading provider",
    "solutions",
    "look no further",
    "synergy",
    "second to none",
];

/// Lexical signals a title needs to read as serving an intent
struct ClaritySignals {
    intent: SearchIntent,
    signals: &'static [&'static str],
    suggestion: &'static str,
}

const CLARITY_SIGNALS: &[ClaritySignals] = &[
    ClaritySignals {
        intent: SearchIntent::Buy,
        signals: &[
            "book", "booking", "pricing", "price", "prices", "cost", "costs", "hire", "quote",
            "packages",
        ],
        suggestion: "Add a commercial cue such as \"pricing\", \"book\" or \"hire\" so buyers know they can act",
    },
    ClaritySignals {
        intent: SearchIntent::Compare,
        signals: &[
            "vs", "versus", "compare", "compared", "comparison", "difference", "differences",
            "alternatives", "which is better",
        ],
        suggestion: "Frame the title as a comparison, e.g. \"X vs Y\" or \"the difference between\"",
    },
    ClaritySignals {
        intent: SearchIntent::Learn,
        signals: &["how to", "what is", "guide", "explained", "why", "tips", "checklist"],
        suggestion: "Signal that the page teaches something: \"how to\", \"guide\" or \"explained\"",
    },
    ClaritySignals {
        intent: SearchIntent::Trust,
        signals: &[
            "reviews", "experience", "trusted", "certified", "accredited", "years", "proven",
            "why choose",
        ],
        suggestion: "Lead with proof: years of experience, reviews or accreditation",
    },
];

/// Regeneration templates per intent
struct TitleTemplate {
    intent: SearchIntent,
    standard: &'static str,
    with_years: Option<&'static str>,
}

const TITLE_TEMPLATES: &[TitleTemplate] = &[
    TitleTemplate {
        intent: SearchIntent::Buy,
        standard: "{Service}{in_location}: Pricing, Packages & How to Book",
        with_years: None,
    },
    TitleTemplate {
        intent: SearchIntent::Compare,
        standard: "{Service}{in_location} Compared: Costs, Differences & How to Choose",
        with_years: None,
    },
    TitleTemplate {
        intent: SearchIntent::Learn,
        standard: "{Service}{in_location} Explained: How It Works & What It Costs",
        with_years: None,
    },
    TitleTemplate {
        intent: SearchIntent::Trust,
        standard: "Why Clients Choose Our {Service}{in_location}: Reviews & Credentials",
        with_years: Some("{Service}{in_location}: {years}+ Years of Trusted Experience"),
    },
];

static OUTCOME_RE: OnceLock<Regex> = OnceLock::new();

fn outcome_re() -> &'static Regex {
    OUTCOME_RE.get_or_init(|| {
        Regex::new(
            r"^\d+\s|\b\d+\s+(?:ways|tips|steps|mistakes|reasons|questions|things|signs|ideas)\b|\bhow to\b|\([^)]*\b(?:cost|costs|price|prices|pricing|mistakes|timeline)\b[^)]*\)|\b(?:save|saving|avoid|achieve)\b",
        )
        .expect("valid outcome regex")
    })
}

/// Result of title analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleAnalysis {
    pub is_valid: bool,
    /// Score of the proposed title, before any rewrite
    pub score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// Final title: the rewrite when one happened, otherwise the original
    pub title: String,
    pub rewritten: bool,
    /// Populated when the title fails validity; routed by the gate
    pub blockers: Vec<String>,
}

/// Whether the title carries an outcome/benefit pattern
pub fn has_outcome_pattern(title_lower: &str) -> bool {
    outcome_re().is_match(title_lower)
}

/// Score the proposed title and rewrite it when it falls short
pub fn evaluate_title(
    proposed: &ProposedContent,
    task: &TaskContext,
    user: &UserContext,
    thresholds: &GateThresholds,
) -> TitleAnalysis {
    let original = proposed.title.trim();
    let lower = original.to_lowercase();
    let mut score: i32 = 100;
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    for phrase in GENERIC_PHRASES.iter().filter(|p| contains_term(&lower, p)) {
        score -= GENERIC_PHRASE_PENALTY;
        issues.push(format!("Title contains generic phrase \"{}\"", phrase));
        suggestions.push(format!(
            "Replace \"{}\" with something specific to {}",
            phrase, task.primary_service
        ));
    }

    if !mentions_service(&lower, &task.primary_service) {
        score -= MISSING_SERVICE_PENALTY;
        issues.push(format!(
            "Title does not mention the primary service \"{}\"",
            task.primary_service
        ));
        suggestions.push(format!("Include \"{}\" in the title", task.primary_service));
    }

    if let Some(location) = task.location() {
        if task.is_money_page() && !lower.contains(&location.to_lowercase()) {
            score -= MISSING_LOCATION_PENALTY;
            issues.push(format!("Money page title is missing the location \"{}\"", location));
            suggestions.push(format!("Add \"{}\" to the title for local relevance", location));
        }
    }

    if let Some(clarity) = CLARITY_SIGNALS.iter().find(|c| c.intent == task.intent) {
        if first_term(&lower, clarity.signals).is_none() {
            score -= INTENT_CLARITY_PENALTY;
            issues.push(format!("Title does not signal {} intent", task.intent));
            suggestions.push(clarity.suggestion.to_string());
        }
    }

    let length = char_len(original);
    if length < thresholds.title_min_chars || length > thresholds.title_max_chars {
        score -= LENGTH_PENALTY;
        issues.push(format!(
            "Title is {} characters; aim for {}-{}",
            length, thresholds.title_min_chars, thresholds.title_max_chars
        ));
    }

    if !has_outcome_pattern(&lower) {
        score -= MISSING_OUTCOME_PENALTY;
        issues.push("Title does not promise an outcome or benefit".to_string());
        suggestions.push(
            "Frame a concrete outcome: a numbered list, \"how to\", or a (cost/timeline) parenthetical"
                .to_string(),
        );
    }

    let score = score.clamp(0, 100) as u8;
    let rewritten = score < thresholds.title_rewrite_below;
    let title = if rewritten {
        regenerate_title(task, user)
    } else {
        original.to_string()
    };

    let is_valid = score >= thresholds.title_valid_min;
    let blockers = if is_valid {
        Vec::new()
    } else {
        vec![format!(
            "Title quality score {} is below the minimum of {}",
            score, thresholds.title_valid_min
        )]
    };

    TitleAnalysis {
        is_valid,
        score,
        issues,
        suggestions,
        title,
        rewritten,
        blockers,
    }
}

/// Build a title from the intent template table
pub fn regenerate_title(task: &TaskContext, user: &UserContext) -> String {
    let years = user.experience.years.filter(|y| *y > 0);
    let placeholders = Placeholders::new(&task.primary_service, task.location()).with_years(years);

    let template = TITLE_TEMPLATES
        .iter()
        .find(|t| t.intent == task.intent)
        .map(|t| match (t.with_years, years) {
            (Some(with_years), Some(_)) => with_years,
            _ => t.standard,
        })
        .unwrap_or("{Service}{in_location}");

    placeholders.render(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRole;

    fn proposal(title: &str) -> ProposedContent {
        ProposedContent {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn buy_task() -> TaskContext {
        TaskContext::new(PageRole::Money, SearchIntent::Buy, "wedding photography")
            .with_location("Bristol")
    }

    #[test]
    fn test_strong_title_kept_verbatim() {
        let analysis = evaluate_title(
            &proposal("Wedding Photography in Bristol — Pricing, Process, Next Steps"),
            &buy_task(),
            &UserContext::default(),
            &GateThresholds::default(),
        );

        // length (61 chars) and outcome penalties only
        assert_eq!(analysis.score, 85);
        assert!(!analysis.rewritten);
        assert_eq!(
            analysis.title,
            "Wedding Photography in Bristol — Pricing, Process, Next Steps"
        );
        assert!(analysis.is_valid);
    }

    #[test]
    fn test_generic_title_rewritten() {
        let analysis = evaluate_title(
            &proposal("Welcome to Our World-Class Solutions"),
            &buy_task(),
            &UserContext::default(),
            &GateThresholds::default(),
        );

        assert!(analysis.score < 70);
        assert!(analysis.rewritten);
        assert!(!analysis.is_valid);
        assert_eq!(analysis.blockers.len(), 1);
        assert_eq!(
            analysis.title,
            "Wedding Photography in Bristol: Pricing, Packages & How to Book"
        );
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.contains("\"welcome to\"")));
    }

    #[test]
    fn test_trust_rewrite_uses_years() {
        let task = TaskContext::new(PageRole::Trust, SearchIntent::Trust, "family law")
            .with_location("leeds");
        let mut user = UserContext::default();
        user.experience.years = Some(15);

        assert_eq!(
            regenerate_title(&task, &user),
            "Family Law in Leeds: 15+ Years of Trusted Experience"
        );

        user.experience.years = None;
        assert_eq!(
            regenerate_title(&task, &user),
            "Why Clients Choose Our Family Law in Leeds: Reviews & Credentials"
        );
    }

    #[test]
    fn test_service_plural_variant_counts() {
        let task = TaskContext::new(PageRole::Support, SearchIntent::Learn, "gutters");
        let analysis = evaluate_title(
            &proposal("How to Clean a Blocked Gutter Before Winter Arrives"),
            &task,
            &UserContext::default(),
            &GateThresholds::default(),
        );
        assert!(!analysis.issues.iter().any(|i| i.contains("primary service")));
        assert_eq!(analysis.score, 100);
    }

    #[test]
    fn test_outcome_patterns() {
        assert!(has_outcome_pattern("7 mistakes to avoid when hiring a builder"));
        assert!(has_outcome_pattern("loft conversions (costs and timeline)"));
        assert!(has_outcome_pattern("how to choose a roofer"));
        assert!(has_outcome_pattern("save money on heating"));
        assert!(!has_outcome_pattern("loft conversions in leeds"));
    }
}

//! Credibility (EEAT) evaluation.
//!
//! Five trust-signal categories are detected independently, each through a
//! strong → moderate → weak cascade. Missing categories produce an
//! injection built from the richest UserContext fact available.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::thresholds::GateThresholds;
use crate::domain::{
    CredibilityInjection, EvidenceStrength, PlacementHint, ProposedContent, Strength,
    TaskContext, TrustSignal, UserContext, VisionContext,
};

use super::text::{contains_any_term, Placeholders, Snapshot};

const STRONG_POINTS: u32 = 25;
const MODERATE_POINTS: u32 = 15;
const WEAK_POINTS: u32 = 5;

const EXPERIENCE_MODERATE: &[&str] = &[
    "years of experience",
    "experienced",
    "experience",
    "we've helped",
    "we have helped",
    "specialists",
    "specialist",
    "specialise",
    "specialize",
    "expert",
    "experts",
];
const FIRST_PERSON: &[&str] = &["we", "our", "us", "i", "my", "we're", "we've", "i'm", "i've"];

const PROOF_MODERATE: &[&str] = &[
    "testimonial",
    "testimonials",
    "reviews",
    "client stories",
    "what our clients say",
    "rated",
    "award-winning",
    "awards",
];
const PROOF_WEAK: &[&str] = &["trusted", "recommended", "feedback", "satisfied", "happy clients"];

const LOCAL_TERMS: &[&str] = &[
    "local",
    "locally",
    "based in",
    "serving",
    "near you",
    "areas we cover",
    "service area",
    "nearby",
];

const PROCESS_MODERATE: &[&str] = &[
    "our process",
    "how it works",
    "what to expect",
    "how we work",
    "what happens next",
];
const PROCESS_WEAK: &[&str] = &["process", "steps", "timeline", "approach", "stages"];

const VISUAL_MODERATE: &[&str] = &[
    "portfolio",
    "gallery",
    "before and after",
    "before-and-after",
    "see our work",
    "case photos",
];
const VISUAL_WEAK: &[&str] = &["photos", "photo", "images", "pictures", "video", "videos"];

static EXPERIENCE_STRONG_RE: OnceLock<Regex> = OnceLock::new();
static PROOF_STRONG_RE: OnceLock<Regex> = OnceLock::new();
static PROCESS_STRONG_RE: OnceLock<Regex> = OnceLock::new();

fn experience_strong_re() -> &'static Regex {
    EXPERIENCE_STRONG_RE.get_or_init(|| {
        Regex::new(
            r"\b\d+\+?\s*(?:years?|yrs|clients|customers|projects|families|couples|weddings|homes|jobs|cases)\b",
        )
        .expect("valid experience regex")
    })
}

fn proof_strong_re() -> &'static Regex {
    PROOF_STRONG_RE.get_or_init(|| {
        Regex::new(
            r"\b\d(?:\.\d)?\s*(?:/\s*5\s*)?(?:stars?|star rating)\b|\b\d+\+?\s*(?:reviews|testimonials|five-star reviews)\b|\bcase stud(?:y|ies)\b",
        )
        .expect("valid proof regex")
    })
}

fn process_strong_re() -> &'static Regex {
    PROCESS_STRONG_RE
        .get_or_init(|| Regex::new(r"\bstep\s*\d|\bstep-by-step\b").expect("valid process regex"))
}

/// Experience: numeric claims, then generic phrasing, then any first person
pub fn detect_experience(text: &str) -> Option<Strength> {
    if experience_strong_re().is_match(text) {
        Some(Strength::Strong)
    } else if contains_any_term(text, EXPERIENCE_MODERATE) {
        Some(Strength::Moderate)
    } else if contains_any_term(text, FIRST_PERSON) {
        Some(Strength::Weak)
    } else {
        None
    }
}

/// Proof: counted reviews or case studies, then testimonials, then trust words
pub fn detect_proof(text: &str) -> Option<Strength> {
    if proof_strong_re().is_match(text) {
        Some(Strength::Strong)
    } else if contains_any_term(text, PROOF_MODERATE) {
        Some(Strength::Moderate)
    } else if contains_any_term(text, PROOF_WEAK) {
        Some(Strength::Weak)
    } else {
        None
    }
}

/// Local: location plus local language, then location, then local language
pub fn detect_local(text: &str, location: &str) -> Option<Strength> {
    let has_location = text.contains(&location.to_lowercase());
    let has_local_language = contains_any_term(text, LOCAL_TERMS);
    match (has_location, has_local_language) {
        (true, true) => Some(Strength::Strong),
        (true, false) => Some(Strength::Moderate),
        (false, true) => Some(Strength::Weak),
        (false, false) => None,
    }
}

/// Process transparency: numbered steps, then named process, then any process word
pub fn detect_process(text: &str) -> Option<Strength> {
    if process_strong_re().is_match(text) {
        Some(Strength::Strong)
    } else if contains_any_term(text, PROCESS_MODERATE) {
        Some(Strength::Moderate)
    } else if contains_any_term(text, PROCESS_WEAK) {
        Some(Strength::Weak)
    } else {
        None
    }
}

/// Visual evidence from the vision summary, falling back to text cues
pub fn detect_visual(text: &str, vision: Option<&VisionContext>) -> Option<Strength> {
    let has_images = vision.is_some_and(VisionContext::has_images);
    if has_images {
        match vision.map(|v| v.evidence_strength) {
            Some(EvidenceStrength::Strong) => return Some(Strength::Strong),
            Some(EvidenceStrength::Moderate) => return Some(Strength::Moderate),
            _ => {}
        }
    }

    if contains_any_term(text, VISUAL_MODERATE) {
        Some(Strength::Moderate)
    } else if has_images || contains_any_term(text, VISUAL_WEAK) {
        Some(Strength::Weak)
    } else {
        None
    }
}

/// Outcome of one signal category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalCheck {
    pub category: TrustSignal,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    pub description: String,
}

impl SignalCheck {
    fn new(category: TrustSignal, strength: Option<Strength>) -> Self {
        let description = match strength {
            Some(s) => format!("{} signal found ({:?})", category, s).to_lowercase(),
            None => format!("no {} signal found", category),
        };
        Self {
            category,
            found: strength.is_some(),
            strength,
            description,
        }
    }
}

/// Result of the credibility evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredibilityEvaluation {
    pub is_valid: bool,
    pub score: u8,
    /// Checks that ran; local is omitted when there is no location
    pub signals: Vec<SignalCheck>,
    pub present: usize,
    pub missing: Vec<TrustSignal>,
    pub injections: Vec<CredibilityInjection>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub blockers: Vec<String>,
}

/// Detect trust signals and propose injections for the missing ones
pub fn evaluate_credibility(
    proposed: &ProposedContent,
    task: &TaskContext,
    user: &UserContext,
    vision: Option<&VisionContext>,
    thresholds: &GateThresholds,
) -> CredibilityEvaluation {
    let snapshot = Snapshot::from_proposal(proposed);
    let text = snapshot.text.as_str();

    let mut signals = vec![
        SignalCheck::new(TrustSignal::Experience, detect_experience(text)),
        SignalCheck::new(TrustSignal::Proof, detect_proof(text)),
    ];
    if let Some(location) = task.location() {
        signals.push(SignalCheck::new(TrustSignal::Local, detect_local(text, location)));
    }
    signals.push(SignalCheck::new(TrustSignal::Process, detect_process(text)));
    signals.push(SignalCheck::new(TrustSignal::Visual, detect_visual(text, vision)));

    let points: u32 = signals
        .iter()
        .filter_map(|s| s.strength)
        .map(|s| match s {
            Strength::Strong => STRONG_POINTS,
            Strength::Moderate => MODERATE_POINTS,
            Strength::Weak => WEAK_POINTS,
        })
        .sum();
    let score = points.min(100) as u8;

    let present = signals.iter().filter(|s| s.found).count();
    let missing: Vec<TrustSignal> = signals
        .iter()
        .filter(|s| !s.found)
        .map(|s| s.category)
        // process only counts as missing on money pages
        .filter(|c| *c != TrustSignal::Process || task.is_money_page())
        .collect();

    let placeholders = Placeholders::new(&task.primary_service, task.location());
    let injections: Vec<CredibilityInjection> = missing
        .iter()
        .map(|c| build_injection(*c, user, &placeholders))
        .collect();

    let issues: Vec<String> = missing
        .iter()
        .map(|c| format!("Missing {} credibility signal", c))
        .collect();
    let suggestions: Vec<String> = missing.iter().map(|c| improvement_suggestion(*c)).collect();

    let is_valid = present >= thresholds.credibility_min_signals;
    let mut blockers = Vec::new();
    if !is_valid {
        if task.is_money_page() {
            blockers.push("Money page requires minimum credibility signals".to_string());
        } else {
            blockers.push(format!(
                "Content requires at least {} credibility signals (found {})",
                thresholds.credibility_min_signals, present
            ));
        }
    }
    if task.is_money_page() && missing.contains(&TrustSignal::Process) {
        blockers.push("Money page must explain its process (no process transparency signal)".to_string());
    }

    CredibilityEvaluation {
        is_valid,
        score,
        signals,
        present,
        missing,
        injections,
        issues,
        suggestions,
        blockers,
    }
}

fn improvement_suggestion(category: TrustSignal) -> String {
    let text = match category {
        TrustSignal::Experience => "Add specific experience: years in business or number of clients served",
        TrustSignal::Proof => "Add social proof: a review quote, star rating or short case study",
        TrustSignal::Local => "Mention the service area and local landmarks to show you are genuinely local",
        TrustSignal::Process => "Explain the process step by step so buyers know what to expect",
        TrustSignal::Visual => "Plan real photos of your work rather than stock imagery",
    };
    text.to_string()
}

/// Build one injection for a missing category from the richest user fact
fn build_injection(
    category: TrustSignal,
    user: &UserContext,
    placeholders: &Placeholders,
) -> CredibilityInjection {
    let (content, placement) = match category {
        TrustSignal::Experience => (experience_snippet(user, placeholders), PlacementHint::Introduction),
        TrustSignal::Proof => (proof_snippet(user, placeholders), PlacementHint::BeforeCallToAction),
        TrustSignal::Local => (local_snippet(user, placeholders), PlacementHint::Closing),
        TrustSignal::Process => (
            placeholders.render(
                "Here's exactly what happens after you get in touch: an initial consultation, a clear written plan for your {service}, then delivery with updates throughout.",
            ),
            PlacementHint::ProcessSection,
        ),
        TrustSignal::Visual => (
            placeholders.render("Add a hero image showing real {service} work, plus captioned photos from recent projects."),
            PlacementHint::Hero,
        ),
    };

    CredibilityInjection {
        kind: category,
        content,
        placement,
    }
}

fn experience_snippet(user: &UserContext, placeholders: &Placeholders) -> String {
    let facts = &user.experience;
    if let Some(years) = facts.years.filter(|y| *y > 0) {
        placeholders.render(&format!(
            "With over {} years of experience in {{service}}, we know exactly what it takes to get it right.",
            years
        ))
    } else if let Some(volume) = facts.volume.filter(|v| *v > 0) {
        placeholders.render(&format!(
            "We've completed more than {} {{service}} projects for clients like you.",
            volume
        ))
    } else if !facts.specialties.is_empty() {
        format!("We specialise in {}.", facts.specialties.join(", "))
    } else if !user.credentials.is_empty() {
        format!("Our credentials: {}.", user.credentials.join(", "))
    } else {
        placeholders.render("[Add how long you have been providing {service} and how many clients you have served]")
    }
}

fn proof_snippet(user: &UserContext, placeholders: &Placeholders) -> String {
    if let Some(review) = user.reviews.iter().find(|r| !r.text.trim().is_empty()) {
        if review.theme.trim().is_empty() {
            format!("\"{}\" (client review)", review.text.trim())
        } else {
            format!("\"{}\" (client review on {})", review.text.trim(), review.theme.trim())
        }
    } else if !user.credentials.is_empty() {
        format!("Our credentials: {}.", user.credentials.join(", "))
    } else if let Some(volume) = user.experience.volume.filter(|v| *v > 0) {
        placeholders.render(&format!(
            "Trusted by more than {} {{service}} clients.",
            volume
        ))
    } else {
        placeholders.render("[Add a short client testimonial about your {service}]")
    }
}

fn local_snippet(user: &UserContext, placeholders: &Placeholders) -> String {
    match user.local_signals.iter().find(|s| !s.trim().is_empty()) {
        Some(signal) => placeholders.render(&format!(
            "{}, proudly serving {{Location}} and the surrounding area.",
            signal.trim()
        )),
        None => placeholders.render("Proudly serving {Location} and the surrounding area."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageRole, ReviewSnippet, SearchIntent};

    fn proposal(title: &str, headings: &[&str], meta: &str) -> ProposedContent {
        ProposedContent {
            title: title.to_string(),
            headings: headings.iter().map(|h| h.to_string()).collect(),
            focus_keyphrase: String::new(),
            meta_description: meta.to_string(),
        }
    }

    #[test]
    fn test_experience_cascade() {
        assert_eq!(detect_experience("over 12+ years in the trade"), Some(Strength::Strong));
        assert_eq!(detect_experience("500 clients served"), Some(Strength::Strong));
        assert_eq!(detect_experience("an experienced team"), Some(Strength::Moderate));
        assert_eq!(detect_experience("contact us"), Some(Strength::Weak));
        assert_eq!(
            detect_experience("i photograph weddings across bristol"),
            Some(Strength::Weak)
        );
        // no match inside words
        assert_eq!(detect_experience("wi-fi included"), None);
        assert_eq!(detect_experience("roof repair pricing"), None);
    }

    #[test]
    fn test_proof_and_process_cascades() {
        assert_eq!(detect_proof("rated 4.9 stars"), Some(Strength::Strong));
        assert_eq!(detect_proof("read a case study"), Some(Strength::Strong));
        assert_eq!(detect_proof("client testimonials"), Some(Strength::Moderate));
        assert_eq!(detect_proof("highly recommended"), Some(Strength::Weak));

        assert_eq!(detect_process("step 1: survey"), Some(Strength::Strong));
        assert_eq!(detect_process("what to expect"), Some(Strength::Moderate));
        assert_eq!(detect_process("project timeline"), Some(Strength::Weak));
        assert_eq!(detect_process("pricing"), None);
    }

    #[test]
    fn test_visual_prefers_vision_summary() {
        let vision = VisionContext {
            hero_image: true,
            inline_images: false,
            evidence_strength: EvidenceStrength::Strong,
        };
        assert_eq!(detect_visual("", Some(&vision)), Some(Strength::Strong));

        let weak = VisionContext {
            evidence_strength: EvidenceStrength::Weak,
            ..vision
        };
        assert_eq!(detect_visual("", Some(&weak)), Some(Strength::Weak));
        assert_eq!(detect_visual("see the gallery", None), Some(Strength::Moderate));
        assert_eq!(detect_visual("", None), None);
    }

    #[test]
    fn test_local_skipped_without_location() {
        let task = TaskContext::new(PageRole::Support, SearchIntent::Learn, "damp proofing");
        let result = evaluate_credibility(
            &proposal("Damp Proofing", &["Causes"], ""),
            &task,
            &UserContext::default(),
            None,
            &GateThresholds::default(),
        );

        assert!(!result.signals.iter().any(|s| s.category == TrustSignal::Local));
        // process not counted as missing off money pages
        assert!(!result.missing.contains(&TrustSignal::Process));
        assert_eq!(
            result.missing,
            vec![TrustSignal::Experience, TrustSignal::Proof, TrustSignal::Visual]
        );
        assert!(!result.is_valid);
        assert!(result.blockers[0].contains("at least 2 credibility signals"));
    }

    #[test]
    fn test_score_and_injections() {
        let task = TaskContext::new(PageRole::Money, SearchIntent::Buy, "kitchen fitting")
            .with_location("York");
        let mut user = UserContext::default();
        user.experience.years = Some(20);
        user.reviews.push(ReviewSnippet {
            theme: "tidiness".to_string(),
            text: "Left the place spotless".to_string(),
        });

        let result = evaluate_credibility(
            &proposal("Kitchen Fitting in York", &["Step 1: Free Survey", "Pricing"], ""),
            &task,
            &user,
            None,
            &GateThresholds::default(),
        );

        // local moderate (15) + process strong (25)
        assert_eq!(result.score, 40);
        assert_eq!(result.present, 2);
        assert!(result.is_valid);
        assert_eq!(
            result.missing,
            vec![TrustSignal::Experience, TrustSignal::Proof, TrustSignal::Visual]
        );

        let experience = &result.injections[0];
        assert_eq!(experience.placement, PlacementHint::Introduction);
        assert!(experience.content.contains("20 years of experience in kitchen fitting"));
        assert_eq!(
            result.injections[1].content,
            "\"Left the place spotless\" (client review on tidiness)"
        );
        assert!(result.blockers.is_empty());
    }

    #[test]
    fn test_money_page_without_signals_blocks() {
        let task = TaskContext::new(PageRole::Money, SearchIntent::Buy, "boiler installation");
        let result = evaluate_credibility(
            &proposal("Boiler Installation Prices", &["Prices", "Get a Quote"], ""),
            &task,
            &UserContext::default(),
            None,
            &GateThresholds::default(),
        );

        assert_eq!(result.present, 0);
        assert!(result
            .blockers
            .contains(&"Money page requires minimum credibility signals".to_string()));
        assert!(result.blockers.iter().any(|b| b.contains("process")));
        assert_eq!(result.injections.len(), 4);
    }
}

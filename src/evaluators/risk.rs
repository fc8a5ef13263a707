//! Risk and compliance scanning.
//!
//! Three scans run over the combined proposal text:
//! - Category keywords (legal, medical, finance, children, guarantees)
//! - Guarantee / absolute-promise phrasing
//! - Unsubstantiated outcome claims
//!
//! Category hits drive disclaimer copy. Children hits also trigger a
//! child-safety scan whose matches always block. Matches that overlap in the
//! text collapse into one flag, so a single claim is only scored once.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{ComplianceCategory, ComplianceResult, ProposedContent, TaskContext};

use super::text::{term_matches, Snapshot};

const CATEGORY_POINTS: u32 = 15;
const WARNING_POINTS: u32 = 5;
const BLOCK_POINTS: u32 = 20;

/// Risk keyword categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Legal,
    Medical,
    Finance,
    Children,
    Guarantees,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Legal => write!(f, "legal"),
            RiskCategory::Medical => write!(f, "medical"),
            RiskCategory::Finance => write!(f, "finance"),
            RiskCategory::Children => write!(f, "children"),
            RiskCategory::Guarantees => write!(f, "guarantees"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Which scan produced a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    Category,
    Guarantee,
    OutcomeClaim,
    ChildSafety,
}

/// A phrase the scanner objected to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedPhrase {
    pub phrase: String,
    pub source: ScanSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RiskCategory>,
    pub severity: Severity,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

/// A flag and the byte range it matched in the scanned text
struct Hit {
    start: usize,
    end: usize,
    flag: FlaggedPhrase,
}

struct CategoryKeywords {
    category: RiskCategory,
    keywords: &'static [&'static str],
}

const CATEGORY_KEYWORDS: &[CategoryKeywords] = &[
    CategoryKeywords {
        category: RiskCategory::Legal,
        keywords: &[
            "legal advice", "lawsuit", "sue", "litigation", "win your case", "no win no fee",
        ],
    },
    CategoryKeywords {
        category: RiskCategory::Medical,
        keywords: &[
            "cure", "cures", "diagnose", "prescription", "medical advice", "heal", "heals",
            "miracle",
        ],
    },
    CategoryKeywords {
        category: RiskCategory::Finance,
        keywords: &[
            "investment returns", "returns", "loan", "loans", "mortgage", "credit score", "debt",
            "tax advice", "financial advice", "interest rate",
        ],
    },
    CategoryKeywords {
        category: RiskCategory::Children,
        keywords: &[
            "children", "child", "kids", "newborn", "newborns", "baby", "babies", "toddler",
            "toddlers", "minors", "teenagers",
        ],
    },
    CategoryKeywords {
        category: RiskCategory::Guarantees,
        keywords: &["guarantee", "guaranteed", "guarantees", "100%", "promise", "promised"],
    },
];

/// Words that make a promise unconditional
const ABSOLUTE_WORDS: &[&str] = &[
    "guarantee", "100%", "always", "never", "definitely", "certain", "every time",
];

const DISCLAIMERS: &[(RiskCategory, &str)] = &[
    (
        RiskCategory::Legal,
        "This article provides general information only and does not constitute legal advice. Speak to a qualified solicitor about your specific situation.",
    ),
    (
        RiskCategory::Medical,
        "This content is for general information only and is not a substitute for professional medical advice, diagnosis or treatment.",
    ),
    (
        RiskCategory::Finance,
        "This content is for general information only and is not financial advice. Costs and outcomes vary with individual circumstances.",
    ),
    (
        RiskCategory::Children,
        "Sessions involving children always take place with a parent or guardian present, and images of minors are only shared with written consent.",
    ),
];

/// Phrasing that puts children at risk; always blocks
const CHILD_SAFETY_PHRASES: &[&str] = &[
    "unsupervised",
    "without a parent",
    "without parents",
    "without supervision",
    "alone with",
    "drop off your child",
    "share photos of your child",
    "post photos of your child",
    "share your child's photos",
    "photos of kids online",
    "tag your child",
];

/// A regex-backed claim pattern. `severity: None` means decide by absolute words.
struct ClaimRule {
    pattern: &'static str,
    reason: &'static str,
    severity: Option<Severity>,
    alternative: Option<&'static str>,
}

const GUARANTEE_RULES: &[ClaimRule] = &[
    ClaimRule {
        pattern: r"\bmoney[- ]back(?:\s+guarantee[ds]?)?",
        reason: "money-back promise",
        severity: None,
        alternative: Some("State your refund policy and its conditions instead"),
    },
    ClaimRule {
        pattern: r"\b100\s*%(?:\s+[a-z]+)?",
        reason: "absolute guarantee language",
        severity: None,
        alternative: Some("Replace \"100%\" with a verifiable figure or remove it"),
    },
    ClaimRule {
        pattern: r"\bnever\s+(?:fails?|lose|loses|lets? you down)\b",
        reason: "absolute never-fail promise",
        severity: None,
        alternative: Some("Describe your track record with real numbers"),
    },
    ClaimRule {
        pattern: r"\balways\s+(?:[a-z]+\s+){0,2}results?\b",
        reason: "promise of consistent results",
        severity: None,
        alternative: Some("Say what clients typically see rather than what always happens"),
    },
    ClaimRule {
        pattern: r"\bguarantee[ds]?\b(?:\s+[a-z]+)?",
        reason: "guarantee of outcome",
        severity: None,
        alternative: Some("Guarantee the service standard, not the outcome"),
    },
    ClaimRule {
        pattern: r"\brisk[- ]free\b",
        reason: "risk-free claim",
        severity: None,
        alternative: Some("Explain the cancellation or refund terms"),
    },
    ClaimRule {
        pattern: r"\bno[- ]risk\b",
        reason: "no-risk claim",
        severity: None,
        alternative: Some("Explain the cancellation or refund terms"),
    },
];

const OUTCOME_RULES: &[ClaimRule] = &[
    ClaimRule {
        pattern: r"\bwill definitely\s+[a-z]+",
        reason: "certain-outcome claim",
        severity: Some(Severity::Block),
        alternative: Some("Use hedged wording such as \"can help\" or \"is designed to\""),
    },
    ClaimRule {
        pattern: r"\bwill\s+(?:win|cure|fix|eliminate|double|triple)\b(?:\s+[a-z]+)?",
        reason: "promised outcome outside your control",
        severity: Some(Severity::Block),
        alternative: Some("Describe what you do, not an outcome you cannot control"),
    },
    ClaimRule {
        pattern: r"#1\b(?:\s+[a-z]+)?",
        reason: "unsourced ranking claim",
        severity: Some(Severity::Warning),
        alternative: Some("Cite the source of the ranking or remove it"),
    },
    ClaimRule {
        pattern: r"\bnumber one\b(?:\s+[a-z]+)?",
        reason: "unsourced ranking claim",
        severity: Some(Severity::Warning),
        alternative: Some("Cite the source of the ranking or remove it"),
    },
    ClaimRule {
        pattern: r"\bleading provider\b",
        reason: "unverifiable market-position claim",
        severity: Some(Severity::Warning),
        alternative: Some("Replace with a verifiable fact such as years trading or jobs completed"),
    },
    ClaimRule {
        pattern: r"\bbest in (?:the )?(?:uk|country|world|town|city|region)\b",
        reason: "unverifiable superlative",
        severity: Some(Severity::Warning),
        alternative: Some("Qualify the claim with an award or review source"),
    },
    ClaimRule {
        pattern: r"\b(?:instant|immediate|overnight) results\b",
        reason: "unrealistic timeframe",
        severity: Some(Severity::Warning),
        alternative: Some("Give a realistic timeframe"),
    },
    ClaimRule {
        pattern: r"\bproven to\s+[a-z]+",
        reason: "claim of proof without evidence",
        severity: Some(Severity::Warning),
        alternative: Some("Link to the evidence or soften to \"designed to\""),
    },
];

static GUARANTEE_RES: OnceLock<Vec<Regex>> = OnceLock::new();
static OUTCOME_RES: OnceLock<Vec<Regex>> = OnceLock::new();

fn compile_rules(rules: &[ClaimRule]) -> Vec<Regex> {
    rules
        .iter()
        .map(|r| Regex::new(r.pattern).expect("valid claim regex"))
        .collect()
}

fn guarantee_res() -> &'static [Regex] {
    GUARANTEE_RES.get_or_init(|| compile_rules(GUARANTEE_RULES))
}

fn outcome_res() -> &'static [Regex] {
    OUTCOME_RES.get_or_init(|| compile_rules(OUTCOME_RULES))
}

/// Whether a phrase contains an unambiguous absolute word
pub fn is_absolute(phrase: &str) -> bool {
    let compact = phrase.to_lowercase().replace(' ', "");
    compact.contains("100%")
        || ABSOLUTE_WORDS
            .iter()
            .any(|w| phrase.to_lowercase().contains(w))
}

/// Result of the risk scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScan {
    pub score: u8,
    pub level: RiskLevel,
    pub detected_categories: Vec<RiskCategory>,
    pub flagged: Vec<FlaggedPhrase>,
    pub blockers: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub compliance: ComplianceResult,
}

impl RiskScan {
    pub fn blocking_count(&self) -> usize {
        self.flagged
            .iter()
            .filter(|f| f.severity == Severity::Block)
            .count()
    }
}

/// Scan one category table entry; every occurrence becomes a hit
fn scan_category(text: &str, entry: &CategoryKeywords) -> Vec<Hit> {
    let mut hits = Vec::new();
    for keyword in entry.keywords {
        let severity = if is_absolute(keyword)
            || matches!(
                entry.category,
                RiskCategory::Guarantees | RiskCategory::Medical | RiskCategory::Legal
            ) {
            Severity::Block
        } else {
            Severity::Warning
        };
        for (start, end) in term_matches(text, keyword) {
            hits.push(Hit {
                start,
                end,
                flag: FlaggedPhrase {
                    phrase: keyword.to_string(),
                    source: ScanSource::Category,
                    category: Some(entry.category),
                    severity,
                    reason: format!("{} risk keyword", entry.category),
                    alternative: None,
                },
            });
        }
    }
    hits
}

fn scan_claims(text: &str, rules: &[ClaimRule], regexes: &[Regex], source: ScanSource) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (rule, re) in rules.iter().zip(regexes) {
        for m in re.find_iter(text) {
            let phrase = m.as_str().trim().to_string();
            let severity = rule.severity.unwrap_or(if is_absolute(&phrase) {
                Severity::Block
            } else {
                Severity::Warning
            });
            hits.push(Hit {
                start: m.start(),
                end: m.end(),
                flag: FlaggedPhrase {
                    phrase,
                    source,
                    category: (source == ScanSource::Guarantee).then_some(RiskCategory::Guarantees),
                    severity,
                    reason: rule.reason.to_string(),
                    alternative: rule.alternative.map(str::to_string),
                },
            });
        }
    }
    hits
}

fn scan_child_safety(text: &str) -> Vec<Hit> {
    let mut hits = Vec::new();
    for phrase in CHILD_SAFETY_PHRASES {
        for (start, matched) in text.match_indices(phrase) {
            hits.push(Hit {
                start,
                end: start + matched.len(),
                flag: FlaggedPhrase {
                    phrase: phrase.to_string(),
                    source: ScanSource::ChildSafety,
                    category: Some(RiskCategory::Children),
                    severity: Severity::Block,
                    reason: "child-safety concern (unsupervised access or sharing images of minors)"
                        .to_string(),
                    alternative: Some(
                        "State that a parent or guardian is always present and images are shared only with consent"
                            .to_string(),
                    ),
                },
            });
        }
    }
    hits
}

/// Collapse hits whose ranges overlap into one flag spanning their union.
///
/// The surviving flag is the most severe; ties go to claim scans over
/// category keywords, then the earliest and longest match.
fn merge_overlapping(text: &str, mut hits: Vec<Hit>) -> Vec<FlaggedPhrase> {
    hits.sort_by_key(|h| (h.start, h.end));

    let mut clusters: Vec<(usize, usize, Vec<Hit>)> = Vec::new();
    for hit in hits {
        let overlaps = clusters.last().is_some_and(|(_, end, _)| hit.start < *end);
        match clusters.last_mut() {
            Some((_, end, members)) if overlaps => {
                *end = (*end).max(hit.end);
                members.push(hit);
            }
            _ => clusters.push((hit.start, hit.end, vec![hit])),
        }
    }

    clusters
        .into_iter()
        .filter_map(|(start, end, members)| {
            let best = members.into_iter().min_by_key(|h| {
                (
                    Reverse(h.flag.severity),
                    h.flag.source == ScanSource::Category,
                    h.start,
                    Reverse(h.end - h.start),
                )
            })?;
            Some(FlaggedPhrase {
                phrase: text[start..end].trim().to_string(),
                ..best.flag
            })
        })
        .collect()
}

/// Keep one flag per phrase (case-insensitive), the most severe, in first-seen order
fn dedupe_flags(flags: Vec<FlaggedPhrase>) -> Vec<FlaggedPhrase> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<FlaggedPhrase> = Vec::new();
    for flag in flags {
        let key = flag.phrase.to_lowercase();
        match index.get(&key).copied() {
            Some(i) if flag.severity > unique[i].severity => unique[i] = flag,
            Some(_) => {}
            None => {
                index.insert(key, unique.len());
                unique.push(flag);
            }
        }
    }
    unique
}

fn risk_level(score: u8, has_blockers: bool) -> RiskLevel {
    if has_blockers {
        RiskLevel::Critical
    } else if score >= 60 {
        RiskLevel::High
    } else if score >= 30 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn primary_category(detected: &BTreeSet<RiskCategory>, any_flags: bool) -> Option<ComplianceCategory> {
    let priority = [
        (RiskCategory::Medical, ComplianceCategory::Medical),
        (RiskCategory::Legal, ComplianceCategory::Legal),
        (RiskCategory::Finance, ComplianceCategory::Finance),
        (RiskCategory::Children, ComplianceCategory::Children),
    ];
    priority
        .iter()
        .find(|(risk, _)| detected.contains(risk))
        .map(|(_, compliance)| *compliance)
        .or_else(|| any_flags.then_some(ComplianceCategory::General))
}

/// Run all risk scans over the proposal
pub fn scan_risk(proposed: &ProposedContent, _task: &TaskContext) -> RiskScan {
    let snapshot = Snapshot::from_proposal(proposed);
    let keyphrase = proposed.focus_keyphrase.trim().to_lowercase();
    let text = if keyphrase.is_empty() {
        snapshot.text
    } else {
        format!("{} {}", snapshot.text, keyphrase)
    };

    let mut detected = BTreeSet::new();
    let mut hits = Vec::new();

    for entry in CATEGORY_KEYWORDS {
        let category_hits = scan_category(&text, entry);
        if !category_hits.is_empty() {
            detected.insert(entry.category);
            hits.extend(category_hits);
        }
    }

    hits.extend(scan_claims(&text, GUARANTEE_RULES, guarantee_res(), ScanSource::Guarantee));
    hits.extend(scan_claims(&text, OUTCOME_RULES, outcome_res(), ScanSource::OutcomeClaim));

    if detected.contains(&RiskCategory::Children) {
        hits.extend(scan_child_safety(&text));
    }

    let flagged = dedupe_flags(merge_overlapping(&text, hits));

    let claims_requiring_verification: Vec<String> = flagged
        .iter()
        .filter(|f| matches!(f.source, ScanSource::Guarantee | ScanSource::OutcomeClaim))
        .map(|f| f.phrase.clone())
        .collect();

    let mut blockers = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();
    for flag in &flagged {
        match flag.severity {
            Severity::Block => {
                blockers.push(format!("Blocked phrase \"{}\": {}", flag.phrase, flag.reason))
            }
            Severity::Warning => {
                warnings.push(format!("Risky phrase \"{}\": {}", flag.phrase, flag.reason))
            }
        }
        if let Some(alternative) = &flag.alternative {
            if !suggestions.contains(alternative) {
                suggestions.push(alternative.clone());
            }
        }
    }

    let disclaimers: Vec<String> = DISCLAIMERS
        .iter()
        .filter(|(category, _)| detected.contains(category))
        .map(|(_, copy)| copy.to_string())
        .collect();
    for (category, _) in DISCLAIMERS.iter().filter(|(c, _)| detected.contains(c)) {
        suggestions.push(format!("Include the {} disclaimer on the published page", category));
    }

    let blocking = flagged.iter().filter(|f| f.severity == Severity::Block).count() as u32;
    let warning = flagged.len() as u32 - blocking;
    let points =
        CATEGORY_POINTS * detected.len() as u32 + WARNING_POINTS * warning + BLOCK_POINTS * blocking;
    let score = points.min(100) as u8;

    let compliance = ComplianceResult {
        disclaimer_required: !disclaimers.is_empty(),
        disclaimers,
        claims_requiring_verification,
        primary_category: primary_category(&detected, !flagged.is_empty()),
    };

    RiskScan {
        score,
        level: risk_level(score, !blockers.is_empty()),
        detected_categories: detected.into_iter().collect(),
        flagged,
        blockers,
        warnings,
        suggestions,
        compliance,
    }
}

//! Text detectors shared by the evaluators
//!
//! Every "does this text carry signal X" question in the gate reduces to the
//! pure functions here: word-bounded term search, heading-prefix matching,
//! and a couple of string builders for templates.
//!
//! All matching is done on lowercased text. Terms are matched on word
//! boundaries only at edges that are alphanumeric, so `"vs"` does not match
//! inside `"canvas"` while `"100%"` still matches `"100% refund"`.

use crate::domain::{ApprovedOutline, ProposedContent};

/// Lowercased view of the text an evaluator inspects
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub title: String,
    pub headings: Vec<String>,
    /// Title, headings and meta description joined by spaces
    pub text: String,
}

impl Snapshot {
    /// Title + headings + meta description
    pub fn from_proposal(proposed: &ProposedContent) -> Self {
        let title = proposed.title.trim().to_lowercase();
        let headings: Vec<String> = proposed
            .headings
            .iter()
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        let mut parts = vec![title.clone()];
        parts.extend(headings.iter().cloned());
        parts.push(proposed.meta_description.trim().to_lowercase());

        Self {
            title,
            headings,
            text: join_non_empty(&parts),
        }
    }

    /// H1 + section headings + subheadings; subheadings count as headings
    pub fn from_outline(outline: &ApprovedOutline) -> Self {
        let title = outline.h1.trim().to_lowercase();
        let mut headings = Vec::new();
        for section in &outline.sections {
            headings.push(section.heading.trim().to_lowercase());
            headings.extend(section.subheadings.iter().map(|s| s.trim().to_lowercase()));
        }
        headings.retain(|h| !h.is_empty());

        let mut parts = vec![title.clone()];
        parts.extend(headings.iter().cloned());

        Self {
            title,
            headings,
            text: join_non_empty(&parts),
        }
    }
}

fn join_non_empty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte ranges of every word-bounded occurrence of an already-lowercased term
pub fn term_matches<'a>(text: &'a str, term: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
    let needs_left = term.chars().next().is_some_and(char::is_alphanumeric);
    let needs_right = term.chars().next_back().is_some_and(char::is_alphanumeric);

    text.match_indices(term)
        .filter(|(_, matched)| !matched.is_empty())
        .map(|(start, matched)| (start, start + matched.len()))
        .filter(move |&(start, end)| {
            let left_ok = !needs_left
                || !text[..start]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphanumeric);
            let right_ok = !needs_right
                || !text[end..].chars().next().is_some_and(char::is_alphanumeric);
            left_ok && right_ok
        })
}

/// Word-bounded containment of an already-lowercased term
pub fn contains_term(text: &str, term: &str) -> bool {
    !term.is_empty() && term_matches(text, term).next().is_some()
}

/// First term from the list present in the text
pub fn first_term<'a>(text: &str, terms: &[&'a str]) -> Option<&'a str> {
    terms.iter().copied().find(|t| contains_term(text, t))
}

pub fn contains_any_term(text: &str, terms: &[&str]) -> bool {
    first_term(text, terms).is_some()
}

/// Whether any heading starts with one of the prefixes
pub fn heading_starts_with_any(headings: &[String], prefixes: &[&str]) -> bool {
    headings
        .iter()
        .any(|h| prefixes.iter().any(|p| h.starts_with(p)))
}

/// Naive singular/plural flip of the last word
pub fn plural_variant(phrase: &str) -> String {
    match phrase.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}s", phrase),
    }
}

/// Terms derived from a service string: the phrase, its plural variant,
/// and every significant word with its variant
pub fn service_terms(service: &str) -> Vec<String> {
    let service = service.trim().to_lowercase();
    let mut terms = vec![service.clone(), plural_variant(&service)];
    for word in service.split_whitespace().filter(|w| char_len(w) > 3) {
        terms.push(word.to_string());
        terms.push(plural_variant(word));
    }
    terms.dedup();
    terms
}

/// Whether the text mentions the service in any derived form
pub fn mentions_service(text: &str, service: &str) -> bool {
    service_terms(service).iter().any(|t| contains_term(text, t))
}

/// Capitalize the first letter of every word
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cut to at most `max` characters, ending in "..." when cut
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        return s.to_string();
    }
    let keep: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", keep.trim_end())
}

/// Values interpolated into heading, title and meta templates.
///
/// Recognised placeholders: `{service}` (as given), `{Service}`
/// (title-cased), `{location}`, `{in_location}` (" in X" or nothing),
/// `{Location}` and `{years}`.
#[derive(Debug, Clone)]
pub struct Placeholders {
    service: String,
    location: Option<String>,
    years: Option<u32>,
}

impl Placeholders {
    pub fn new(service: &str, location: Option<&str>) -> Self {
        Self {
            service: service.trim().to_string(),
            location: location.map(|l| l.trim().to_string()),
            years: None,
        }
    }

    pub fn with_years(mut self, years: Option<u32>) -> Self {
        self.years = years;
        self
    }

    pub fn render(&self, template: &str) -> String {
        let location = self.location.clone().unwrap_or_default();
        let in_location = self
            .location
            .as_ref()
            .map(|l| format!(" in {}", title_case(l)))
            .unwrap_or_default();
        let years = self.years.map(|y| y.to_string()).unwrap_or_default();

        template
            .replace("{Service}", &title_case(&self.service))
            .replace("{service}", &self.service)
            .replace("{in_location}", &in_location)
            .replace("{Location}", &title_case(&location))
            .replace("{location}", &location)
            .replace("{years}", &years)
    }
}

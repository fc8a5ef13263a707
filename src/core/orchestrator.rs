//! The audit gate.
//!
//! Runs the five evaluators over one input, routes their findings by mode,
//! assembles the approved title/outline/meta/keyphrase and renders the
//! approve/block decision.

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::domain::{
    ApprovedOutline, AuditGateInput, AuditScores, GateMode, ProposedContent, SearchIntent,
    TaskContext,
};
use crate::evaluators::text::{char_len, contains_any_term, truncate_with_ellipsis, Placeholders};
use crate::evaluators::{
    check_aeo_coverage, enhance_outline_for_aeo, evaluate_credibility, evaluate_title,
    outline_from_proposal, scan_risk, validate_intent, validate_outline_intent,
};

use super::decision::{ContentIntelGateResult, GateAnalysis, GateVerdict};
use super::thresholds::GateThresholds;

/// Verbs that count as a call to action in a meta description
const CTA_VERBS: &[&str] = &[
    "book", "call", "contact", "get", "request", "schedule", "enquire", "start", "discover",
    "find out", "read", "explore", "compare",
];

const META_TEMPLATES: &[(SearchIntent, &str)] = &[
    (
        SearchIntent::Buy,
        "{Service}{in_location}: clear pricing, what's included and how booking works, from first enquiry to finished job. Book your {service} today.",
    ),
    (
        SearchIntent::Compare,
        "Comparing {service} options{in_location}? See the differences, costs and trade-offs side by side so you can choose with confidence. Get a quote today.",
    ),
    (
        SearchIntent::Learn,
        "How {service} works{in_location}: what it is, what it costs, common mistakes to avoid and what to do next. Read the full guide.",
    ),
    (
        SearchIntent::Trust,
        "Why clients choose us for {service}{in_location}: real reviews, proven experience and a clear process from first call to final result. Contact us today.",
    ),
];

/// Content-quality gate with configured thresholds
#[derive(Debug, Clone, Default)]
pub struct AuditGate {
    thresholds: GateThresholds,
}

impl AuditGate {
    pub fn new(thresholds: GateThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    /// Evaluate one input and decide
    #[instrument(
        skip(self, input, mode),
        fields(mode = %mode, service = %input.task_context.primary_service)
    )]
    pub fn run(&self, input: &AuditGateInput, mode: GateMode) -> ContentIntelGateResult {
        let t = &self.thresholds;
        let task = &input.task_context;
        let proposed = &input.proposed;

        let title = evaluate_title(proposed, task, &input.user_context, t);
        let intent = validate_intent(proposed, task, t);
        let aeo = check_aeo_coverage(proposed, task, t);
        let credibility = evaluate_credibility(
            proposed,
            task,
            &input.user_context,
            input.vision_context.as_ref(),
            t,
        );
        let risk = scan_risk(proposed, task);

        debug!(
            title = title.score,
            intent = intent.score,
            aeo = aeo.score,
            credibility = credibility.score,
            risk = risk.score,
            "Evaluators finished"
        );

        let mut warnings = Vec::new();
        let mut blockers = Vec::new();
        let mut suggestions = Vec::new();

        warnings.extend(title.issues.iter().cloned());
        warnings.extend(intent.issues.iter().cloned());
        warnings.extend(credibility.issues.iter().cloned());
        warnings.extend(risk.warnings.iter().cloned());

        let candidates = title
            .blockers
            .iter()
            .chain(&intent.blockers)
            .chain(&aeo.blockers)
            .chain(&credibility.blockers)
            .cloned();
        match mode {
            GateMode::Planning => warnings.extend(candidates),
            GateMode::PrePublish => blockers.extend(candidates),
        }
        blockers.extend(risk.blockers.iter().cloned());

        suggestions.extend(title.suggestions.iter().cloned());
        suggestions.extend(intent.suggestions.iter().cloned());
        suggestions.extend(aeo.suggestions.iter().cloned());
        suggestions.extend(credibility.suggestions.iter().cloned());
        suggestions.extend(risk.suggestions.iter().cloned());

        let working_title = title.title.clone();

        let mut outline = aeo
            .synthesized_outline
            .clone()
            .unwrap_or_else(|| outline_from_proposal(proposed));
        if !aeo.is_valid {
            outline = enhance_outline_for_aeo(&outline, task, t);
        }
        outline.h1 = working_title.clone();

        let outline_alignment = validate_outline_intent(&outline, task, t);
        warnings.extend(outline_alignment.issues.iter().cloned());

        let meta = approved_meta_description(proposed, task, t);
        if meta != proposed.meta_description {
            suggestions.push("Use the generated meta description".to_string());
        }

        let keyphrase = approved_keyphrase(proposed, task);
        if !working_title.to_lowercase().contains(&keyphrase.to_lowercase()) {
            warnings.push(format!(
                "Focus keyphrase \"{}\" does not appear in the title",
                keyphrase
            ));
        }

        let scores = AuditScores {
            serp_strength: title.score,
            aeo_coverage: aeo.score,
            credibility: credibility.score,
            intent_match: intent.score,
            risk: risk.score,
        };
        let overall_score = t.weights.blend(&scores);

        if mode == GateMode::PrePublish && overall_score < t.prepublish_min_score {
            blockers.push(format!(
                "Overall quality score {:.1} is below the pre-publish minimum of {:.0}",
                overall_score, t.prepublish_min_score
            ));
        }

        let blockers = dedupe(blockers);
        let approved = blockers.is_empty();

        if approved {
            info!(overall_score, "Content approved");
        } else {
            warn!(
                overall_score,
                blockers = blockers.len(),
                first = %blockers[0],
                "Content blocked"
            );
        }

        ContentIntelGateResult {
            approved,
            mode,
            overall_score,
            rewritten_title: working_title,
            approved_outline: outline,
            approved_keyphrase: keyphrase,
            approved_meta_description: meta,
            scores,
            warnings: dedupe(warnings),
            blockers,
            suggestions: dedupe(suggestions),
            credibility_injections: credibility.injections.clone(),
            compliance: risk.compliance.clone(),
            analysis: GateAnalysis {
                title,
                intent,
                aeo,
                credibility,
                risk,
                outline_alignment,
            },
        }
    }

    /// Approval verdict plus the first blocker
    pub fn would_pass(&self, input: &AuditGateInput, mode: GateMode) -> GateVerdict {
        self.run(input, mode).verdict()
    }

    /// Title Intelligence only: the working title for this input
    pub fn rewrite_title(&self, input: &AuditGateInput) -> String {
        evaluate_title(
            &input.proposed,
            &input.task_context,
            &input.user_context,
            &self.thresholds,
        )
        .title
    }

    /// AEO only: the synthesized outline, or the proposal's headings when compliant
    pub fn enhanced_outline(&self, input: &AuditGateInput) -> ApprovedOutline {
        let aeo = check_aeo_coverage(&input.proposed, &input.task_context, &self.thresholds);
        aeo.synthesized_outline
            .unwrap_or_else(|| outline_from_proposal(&input.proposed))
    }
}

/// Keep the proposal's meta when it is usable, otherwise build one from the intent template
fn approved_meta_description(
    proposed: &ProposedContent,
    task: &TaskContext,
    thresholds: &GateThresholds,
) -> String {
    let meta = proposed.meta_description.trim();
    let lower = meta.to_lowercase();
    let len = char_len(meta);

    let length_ok = len >= thresholds.meta_min_chars && len <= thresholds.meta_max_chars;
    let has_service = lower.contains(&task.primary_service.trim().to_lowercase());
    let has_location = task
        .location()
        .map_or(true, |l| lower.contains(&l.to_lowercase()));
    let has_cta = contains_any_term(&lower, CTA_VERBS);

    if length_ok && has_service && has_location && has_cta {
        return proposed.meta_description.clone();
    }

    let template = META_TEMPLATES
        .iter()
        .find(|(intent, _)| *intent == task.intent)
        .map(|(_, template)| *template)
        .unwrap_or(META_TEMPLATES[0].1);
    let rendered = Placeholders::new(&task.primary_service, task.location()).render(template);
    truncate_with_ellipsis(&rendered, thresholds.meta_max_chars)
}

/// Trimmed proposal keyphrase, or one derived from the task
fn approved_keyphrase(proposed: &ProposedContent, task: &TaskContext) -> String {
    let keyphrase = proposed.focus_keyphrase.trim();
    if !keyphrase.is_empty() {
        return keyphrase.to_string();
    }

    let service = task.primary_service.trim().to_lowercase();
    match task.location() {
        Some(location) if task.is_money_page() => {
            format!("{} {}", service, location.to_lowercase())
        }
        _ => service,
    }
}

/// Drop repeats, keeping first-seen order
fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Run the gate with default thresholds
pub fn run_audit_gate(input: &AuditGateInput, mode: GateMode) -> ContentIntelGateResult {
    AuditGate::default().run(input, mode)
}

/// Verdict with default thresholds
pub fn would_pass_gate(input: &AuditGateInput, mode: GateMode) -> GateVerdict {
    AuditGate::default().would_pass(input, mode)
}

/// Working title with default thresholds
pub fn rewrite_title(input: &AuditGateInput) -> String {
    AuditGate::default().rewrite_title(input)
}

/// AEO outline with default thresholds
pub fn get_enhanced_outline(input: &AuditGateInput) -> ApprovedOutline {
    AuditGate::default().enhanced_outline(input)
}

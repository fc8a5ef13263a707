//! Gate Scenario Integration Tests
//!
//! End-to-end runs of the audit gate over realistic proposals in both modes.

use contentgate::core::{AuditGate, GateThresholds};
use contentgate::domain::{
    AuditGateInput, ComplianceCategory, GateMode, InternalLink, PageRole, ProposedContent,
    SearchIntent, SiteContext, TaskContext,
};
use contentgate::{run_audit_gate, would_pass_gate};

const SCENARIO_META: &str = "Relaxed wedding photography in Bristol with clear pricing, a simple process and a full online gallery. Check availability and book your day.";

fn proposal(title: &str, headings: &[&str], keyphrase: &str, meta: &str) -> ProposedContent {
    ProposedContent {
        title: title.to_string(),
        headings: headings.iter().map(|h| h.to_string()).collect(),
        focus_keyphrase: keyphrase.to_string(),
        meta_description: meta.to_string(),
    }
}

fn wedding_task() -> TaskContext {
    TaskContext::new(PageRole::Money, SearchIntent::Buy, "wedding photography").with_location("Bristol")
}

/// Buy-intent page with a good title and intent signals
fn compliant_buy_input() -> AuditGateInput {
    AuditGateInput::new(
        wedding_task(),
        proposal(
            "Wedding Photography in Bristol — Pricing, Process, Next Steps",
            &["How It Works", "Pricing", "Book Your Date"],
            "wedding photography in bristol",
            SCENARIO_META,
        ),
    )
}

/// Page with every signal the gate looks for
fn publishable_input() -> AuditGateInput {
    AuditGateInput::new(
        wedding_task(),
        proposal(
            "Wedding Photography in Bristol (Prices & Packages)",
            &[
                "What Is Included in Our Wedding Photography?",
                "How It Works: Step 1 to Step 3",
                "Pricing and Packages",
                "Over 300 Weddings Photographed Across Bristol",
                "Read Our 120 Five-Star Reviews",
                "Book Your Date",
            ],
            "wedding photography in bristol",
            "Wedding photography in Bristol from a local team: clear pricing, relaxed coverage and a full online gallery. Check dates and book today.",
        ),
    )
}

fn guarantee_input() -> AuditGateInput {
    AuditGateInput::new(
        TaskContext::new(PageRole::Money, SearchIntent::Buy, "personal injury law"),
        proposal(
            "100% Guaranteed Results for Your Case",
            &["How Claims Work", "No Win No Fee Explained", "Contact Us"],
            "",
            "",
        ),
    )
}

fn missing_credibility_input() -> AuditGateInput {
    AuditGateInput::new(
        TaskContext::new(PageRole::Money, SearchIntent::Buy, "boiler installation"),
        proposal(
            "Boiler Installation Prices and Quotes",
            &["Boiler Installation Costs", "Choosing a Boiler", "Get a Quote"],
            "boiler installation",
            "",
        ),
    )
}

#[test]
fn test_guarantee_language_blocks_in_both_modes() {
    let input = guarantee_input();

    for mode in [GateMode::Planning, GateMode::PrePublish] {
        let result = run_audit_gate(&input, mode);
        assert!(!result.approved, "{} should block", mode);
        assert!(result
            .blockers
            .iter()
            .any(|b| b.contains("guarantee") || b.contains("100%")));
    }

    let result = run_audit_gate(&input, GateMode::Planning);
    assert!(result.compliance.disclaimer_required);
    assert_eq!(result.compliance.primary_category, Some(ComplianceCategory::Legal));
    assert!(result
        .compliance
        .claims_requiring_verification
        .iter()
        .any(|c| c.starts_with("100%")));
    // legal + guarantees categories, one blocker per distinct claim
    assert_eq!(result.scores.risk, 70);
}

#[test]
fn test_compliant_buy_page_keeps_title_and_meta() {
    let input = compliant_buy_input();
    let result = run_audit_gate(&input, GateMode::Planning);

    assert!(result.analysis.title.score >= 70);
    assert!(!result.analysis.title.rewritten);
    assert_eq!(result.rewritten_title, input.proposed.title);
    assert!(result.analysis.intent.is_valid);
    assert_eq!(result.scores.intent_match, 100);
    assert_eq!(result.approved_meta_description, SCENARIO_META);
    assert_eq!(result.approved_keyphrase, "wedding photography in bristol");
    assert!(result.approved);
}

#[test]
fn test_compliant_buy_page_outline_gets_missing_definition() {
    let result = run_audit_gate(&compliant_buy_input(), GateMode::Planning);

    // "what is it" is the one required category the proposal lacks
    assert!(!result.analysis.aeo.is_valid);
    assert!(result
        .approved_outline
        .headings()
        .contains(&"What Is Wedding Photography?".to_string()));
    assert_eq!(result.approved_outline.h1, result.rewritten_title);
    assert!(result.warnings.iter().any(|w| w.contains("What is it?")));
}

#[test]
fn test_money_page_without_credibility_blocks_prepublish() {
    let input = missing_credibility_input();

    let result = run_audit_gate(&input, GateMode::PrePublish);
    assert!(!result.approved);
    assert!(result.blockers.iter().any(|b| b.contains("credibility")));
    assert_eq!(result.analysis.credibility.present, 0);
    assert_eq!(result.credibility_injections.len(), 4);

    // Planning downgrades the same finding to a warning
    let planning = run_audit_gate(&input, GateMode::Planning);
    assert!(planning.blockers.is_empty());
    assert!(planning.approved);
    assert!(planning
        .warnings
        .contains(&"Money page requires minimum credibility signals".to_string()));
}

/// Weak title, buy intent on a support page, one heading
fn weak_support_input() -> AuditGateInput {
    AuditGateInput::new(
        TaskContext::new(PageRole::Support, SearchIntent::Buy, "web design"),
        proposal("Welcome to Our Solutions", &["About"], "", ""),
    )
}

#[test]
fn test_prepublish_promotes_evaluator_blockers() {
    let input = weak_support_input();
    let prepublish = run_audit_gate(&input, GateMode::PrePublish);
    let analysis = &prepublish.analysis;

    assert!(!analysis.title.blockers.is_empty());
    assert!(analysis.intent.blockers.iter().any(|b| b.contains("Intent mismatch")));
    assert!(!analysis.aeo.blockers.is_empty());

    let candidates: Vec<&String> = analysis
        .title
        .blockers
        .iter()
        .chain(&analysis.intent.blockers)
        .chain(&analysis.aeo.blockers)
        .chain(&analysis.credibility.blockers)
        .collect();
    for candidate in &candidates {
        assert!(prepublish.blockers.contains(candidate), "not blocking: {}", candidate);
    }
    assert!(!prepublish.approved);
    assert!(prepublish.overall_score < 60.0);

    // Same findings only advise in planning
    let planning = run_audit_gate(&input, GateMode::Planning);
    assert!(planning.blockers.is_empty(), "blockers: {:?}", planning.blockers);
    assert!(planning.approved);
    for candidate in &candidates {
        assert!(planning.warnings.contains(candidate), "missing warning: {}", candidate);
    }
}

#[test]
fn test_outline_alignment_issues_never_block() {
    // The proposal outline tags only its last section, so the buy-intent
    // pricing and process checks fail on it
    let result = run_audit_gate(&publishable_input(), GateMode::PrePublish);
    let issues = &result.analysis.outline_alignment.issues;

    assert_eq!(issues.len(), 2);
    for issue in issues {
        assert!(result.warnings.contains(issue));
        assert!(!result.blockers.contains(issue));
    }
    assert!(result.approved);
}

#[test]
fn test_publishable_page_approved_in_prepublish() {
    let result = run_audit_gate(&publishable_input(), GateMode::PrePublish);

    assert!(result.approved, "blockers: {:?}", result.blockers);
    assert_eq!(result.scores.serp_strength, 100);
    assert_eq!(result.scores.aeo_coverage, 57);
    assert_eq!(result.scores.credibility, 100);
    assert_eq!(result.scores.risk, 0);
    assert!((result.overall_score - 91.4).abs() < 1e-9);
    assert!(!result.suggestions.is_empty());
}

#[test]
fn test_low_overall_score_blocks_prepublish_only() {
    let thresholds = GateThresholds {
        prepublish_min_score: 95.0,
        ..Default::default()
    };
    let gate = AuditGate::new(thresholds);
    let input = publishable_input();

    let prepublish = gate.run(&input, GateMode::PrePublish);
    assert!(!prepublish.approved);
    assert_eq!(prepublish.blockers.len(), 1);
    assert!(prepublish.blockers[0].contains("below the pre-publish minimum"));

    assert!(gate.run(&input, GateMode::Planning).approved);
}

#[test]
fn test_blocker_invariant() {
    let inputs = [
        compliant_buy_input(),
        publishable_input(),
        guarantee_input(),
        missing_credibility_input(),
    ];

    for input in &inputs {
        for mode in [GateMode::Planning, GateMode::PrePublish] {
            let result = run_audit_gate(input, mode);
            assert_eq!(result.approved, result.blockers.is_empty());
            if mode == GateMode::PrePublish && result.overall_score < 60.0 {
                assert!(!result.approved);
            }

            let verdict = would_pass_gate(input, mode);
            assert_eq!(verdict.pass, result.approved);
            assert_eq!(verdict.reason, result.blockers.first().cloned());
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    for input in [compliant_buy_input(), guarantee_input()] {
        let first = serde_json::to_string(&run_audit_gate(&input, GateMode::PrePublish)).unwrap();
        let second = serde_json::to_string(&run_audit_gate(&input, GateMode::PrePublish)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_site_context_is_inert() {
    let plain = compliant_buy_input();
    let mut with_site = compliant_buy_input();
    with_site.site_context = SiteContext {
        sitemap: vec!["/".to_string(), "/pricing".to_string()],
        existing_pages: vec!["Wedding Photography Pricing".to_string()],
        internal_links: vec![InternalLink {
            from: "/".to_string(),
            to: "/pricing".to_string(),
        }],
        competitors: vec!["example-photo.co.uk".to_string()],
    };

    let a = serde_json::to_string(&run_audit_gate(&plain, GateMode::PrePublish)).unwrap();
    let b = serde_json::to_string(&run_audit_gate(&with_site, GateMode::PrePublish)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_warnings_and_suggestions_are_deduplicated() {
    let result = run_audit_gate(&missing_credibility_input(), GateMode::Planning);

    let mut warnings = result.warnings.clone();
    warnings.sort();
    warnings.dedup();
    assert_eq!(warnings.len(), result.warnings.len());

    let mut suggestions = result.suggestions.clone();
    suggestions.sort();
    suggestions.dedup();
    assert_eq!(suggestions.len(), result.suggestions.len());
}

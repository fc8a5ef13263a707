//! Input Limits Integration Tests
//!
//! Boundary validation applied before the gate runs.

use std::io::Write;

use contentgate::config::load_config_from;
use contentgate::core::{InputLimits, InputViolation};
use contentgate::domain::{AuditGateInput, PageRole, ProposedContent, SearchIntent, TaskContext};
use tempfile::NamedTempFile;

fn input(service: &str, title: &str, headings: usize) -> AuditGateInput {
    AuditGateInput::new(
        TaskContext::new(PageRole::Money, SearchIntent::Buy, service),
        ProposedContent {
            title: title.to_string(),
            headings: (0..headings).map(|i| format!("Section {}", i)).collect(),
            ..Default::default()
        },
    )
}

#[test]
fn test_well_formed_input_passes() {
    let limits = InputLimits::default();
    assert!(limits
        .validate(&input("roof repair", "Roof Repair Prices", 6))
        .is_ok());
}

#[test]
fn test_blank_title_and_service_rejected() {
    let limits = InputLimits::default();

    assert_eq!(
        limits.validate(&input("roof repair", "   ", 3)),
        Err(InputViolation::EmptyTitle)
    );
    assert_eq!(
        limits.validate(&input(" ", "Roof Repair Prices", 3)),
        Err(InputViolation::EmptyPrimaryService)
    );
}

#[test]
fn test_heading_count_limit() {
    let limits = InputLimits {
        max_headings: 5,
        ..Default::default()
    };

    // At the limit
    assert!(limits.validate(&input("roof repair", "Roof Repair", 5)).is_ok());

    let result = limits.validate(&input("roof repair", "Roof Repair", 8));
    match result {
        Err(InputViolation::TooManyHeadings { actual, limit }) => {
            assert_eq!(actual, 8);
            assert_eq!(limit, 5);
        }
        _ => panic!("Expected TooManyHeadings violation"),
    }
}

#[test]
fn test_field_length_limit() {
    let limits = InputLimits {
        max_field_chars: 50,
        ..Default::default()
    };

    let mut long_meta = input("roof repair", "Roof Repair", 2);
    long_meta.proposed.meta_description = "é".repeat(60);

    match limits.validate(&long_meta) {
        Err(InputViolation::FieldTooLong {
            field,
            actual,
            limit,
        }) => {
            assert_eq!(field, "meta_description");
            assert_eq!(actual, 60);
            assert_eq!(limit, 50);
        }
        other => panic!("Expected FieldTooLong violation, got {:?}", other),
    }

    let mut long_heading = input("roof repair", "Roof Repair", 0);
    long_heading.proposed.headings = vec!["x".repeat(51)];
    let err = limits.validate(&long_heading).unwrap_err();
    assert_eq!(err.to_string(), "Field 'heading' too long: 51 > 50 characters");
}

#[test]
fn test_limits_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "limits:\n  max_headings: 2").unwrap();

    let config = load_config_from(Some(file.path())).unwrap();
    assert_eq!(config.limits.max_headings, 2);
    assert!(matches!(
        config.limits.validate(&input("roof repair", "Roof Repair", 3)),
        Err(InputViolation::TooManyHeadings { actual: 3, limit: 2 })
    ));
}

//! Boundary validation for gate input.
//!
//! The gate itself assumes well-formed input. Callers (the CLI included)
//! run these checks first to reject:
//! - Blank titles or services
//! - Oversized outlines
//! - Oversized text fields

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AuditGateInput;

/// Size limits applied before a gate invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLimits {
    /// Maximum number of proposed headings (default: 40)
    #[serde(default = "default_max_headings")]
    pub max_headings: usize,

    /// Maximum characters in any single field (default: 1000)
    #[serde(default = "default_max_field_chars")]
    pub max_field_chars: usize,
}

fn default_max_headings() -> usize {
    40
}
fn default_max_field_chars() -> usize {
    1000
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_headings: default_max_headings(),
            max_field_chars: default_max_field_chars(),
        }
    }
}

impl InputLimits {
    /// Validate an input against the limits
    pub fn validate(&self, input: &AuditGateInput) -> Result<(), InputViolation> {
        let proposed = &input.proposed;

        if proposed.title.trim().is_empty() {
            return Err(InputViolation::EmptyTitle);
        }

        if input.task_context.primary_service.trim().is_empty() {
            return Err(InputViolation::EmptyPrimaryService);
        }

        if proposed.headings.len() > self.max_headings {
            return Err(InputViolation::TooManyHeadings {
                actual: proposed.headings.len(),
                limit: self.max_headings,
            });
        }

        let fields = [
            ("title", proposed.title.as_str()),
            ("focus_keyphrase", proposed.focus_keyphrase.as_str()),
            ("meta_description", proposed.meta_description.as_str()),
            ("primary_service", input.task_context.primary_service.as_str()),
        ];
        for (field, value) in fields
            .into_iter()
            .chain(proposed.headings.iter().map(|h| ("heading", h.as_str())))
        {
            let chars = value.chars().count();
            if chars > self.max_field_chars {
                return Err(InputViolation::FieldTooLong {
                    field: field.to_string(),
                    actual: chars,
                    limit: self.max_field_chars,
                });
            }
        }

        Ok(())
    }
}

/// Input rejected at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputViolation {
    #[error("Proposed title is empty")]
    EmptyTitle,

    #[error("Task primary service is empty")]
    EmptyPrimaryService,

    #[error("Too many headings: {actual} > {limit}")]
    TooManyHeadings { actual: usize, limit: usize },

    #[error("Field '{field}' too long: {actual} > {limit} characters")]
    FieldTooLong {
        field: String,
        actual: usize,
        limit: usize,
    },
}

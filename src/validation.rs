//! Input validation for scheduling runs.
//!
//! Checks structural integrity of the waiting list and session calendar
//! before any model is built. Detects:
//! - Duplicate IDs
//! - Non-positive durations (a zero-length session would also divide the
//!   utilization definition by zero)
//! - Negative start times
//!
//! Capacity misfits (a case longer than every session) are deliberately
//! NOT validated here: they surface as missed cases in the report, never
//! as a crash.

use crate::models::{Case, Session};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A case or session has a zero or negative duration.
    NonPositiveDuration,
    /// A session starts before midnight of its own date.
    NegativeStartTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling run.
///
/// Checks:
/// 1. No duplicate case IDs
/// 2. No duplicate session IDs
/// 3. All case durations are positive
/// 4. All session durations are positive
/// 5. All session start times are non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(cases: &[Case], sessions: &[Session]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut case_ids = HashSet::new();
    for case in cases {
        if !case_ids.insert(case.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate case ID: {}", case.id),
            ));
        }
        if case.duration_min <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Case '{}' has non-positive duration {} min",
                    case.id, case.duration_min
                ),
            ));
        }
    }

    let mut session_ids = HashSet::new();
    for session in sessions {
        if !session_ids.insert(session.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate session ID: {}", session.id),
            ));
        }
        if session.duration_min <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Session '{}' has non-positive duration {} min",
                    session.id, session.duration_min
                ),
            ));
        }
        if session.start_min < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeStartTime,
                format!(
                    "Session '{}' has negative start time {} min",
                    session.id, session.start_min
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

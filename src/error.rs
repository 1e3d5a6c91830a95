//! Library error types.
//!
//! Covers the failures that abort a scheduling run: invalid input and
//! numeric misconfiguration before model construction, and backend
//! failures during solving. Infeasibility and timeouts are NOT errors —
//! they are first-class report outcomes
//! (see [`SolveStatus`](crate::report::SolveStatus)).

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by model construction and solving.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The waiting list or session calendar failed structural validation.
    #[error("input validation failed: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The configured big-M constant does not dominate the data.
    ///
    /// M must be at least 10x the largest finite quantity appearing in
    /// the constraints (durations, session close times, the horizon, the
    /// date span), otherwise relaxed constraints can bind spuriously.
    #[error(
        "big-M {big_m} is too small: largest model quantity is {max_quantity}, \
         require big-M >= 10x that"
    )]
    BigMTooSmall { big_m: f64, max_quantity: f64 },

    /// The solver backend failed outright (not infeasibility).
    #[error("solver backend '{backend}' failed: {message}")]
    Solver { backend: String, message: String },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_display() {
        let err = ScheduleError::InvalidInput(vec![
            ValidationError {
                kind: ValidationErrorKind::DuplicateId,
                message: "Duplicate case ID: C1".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::NonPositiveDuration,
                message: "Session 'S1' has non-positive duration 0 min".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("Duplicate case ID: C1"));
        assert!(text.contains("S1"));
    }

    #[test]
    fn test_big_m_display() {
        let err = ScheduleError::BigMTooSmall {
            big_m: 100.0,
            max_quantity: 1440.0,
        };
        assert!(err.to_string().contains("big-M 100"));
    }
}

//! Surgical case model.
//!
//! A case is a pending procedure on the waiting list: an expected duration
//! and a clinical deadline by which it must be performed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::ordinal_day;

/// A surgical case awaiting a theatre session.
///
/// # Time Representation
/// Durations are in minutes; the deadline is an ordinal day count so the
/// model can compare dates with linear inequalities (see
/// [`ordinal_day`](super::time::ordinal_day)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Unique case identifier.
    pub id: String,
    /// Expected procedure duration (minutes, positive).
    pub duration_min: i64,
    /// Latest acceptable session date (ordinal day).
    pub deadline_day: i64,
}

impl Case {
    /// Creates a new case.
    pub fn new(id: impl Into<String>, duration_min: i64, deadline_day: i64) -> Self {
        Self {
            id: id.into(),
            duration_min,
            deadline_day,
        }
    }

    /// Creates a case with a calendar deadline.
    pub fn with_deadline_date(
        id: impl Into<String>,
        duration_min: i64,
        deadline: NaiveDate,
    ) -> Self {
        Self::new(id, duration_min, ordinal_day(deadline))
    }

    /// Days of slack when hosted on a session dated `session_day`.
    ///
    /// Negative slack means the session falls after the deadline.
    #[inline]
    pub fn slack_days(&self, session_day: i64) -> i64 {
        self.deadline_day - session_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_new() {
        let case = Case::new("C1", 60, 100);
        assert_eq!(case.id, "C1");
        assert_eq!(case.duration_min, 60);
        assert_eq!(case.deadline_day, 100);
    }

    #[test]
    fn test_case_with_deadline_date() {
        let a = Case::with_deadline_date("C1", 60, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let b = Case::with_deadline_date("C2", 90, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!(b.deadline_day - a.deadline_day, 10);
    }

    #[test]
    fn test_case_slack() {
        let case = Case::new("C1", 60, 100);
        assert_eq!(case.slack_days(95), 5);
        assert_eq!(case.slack_days(100), 0);
        assert_eq!(case.slack_days(103), -3);
    }
}

//! Theatre session model.
//!
//! A session is a block of operating-theatre time on a specific date:
//! a start time, a duration, and nothing else. Staffing and equipment are
//! outside the model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time::{minutes_since_midnight, ordinal_day};

/// A scheduled block of operating-theatre time.
///
/// # Time Representation
/// The date is an ordinal day count; the start time is in minutes since
/// midnight of that date; the duration is in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Session date (ordinal day).
    pub date_day: i64,
    /// Start time (minutes since midnight, non-negative).
    pub start_min: i64,
    /// Block length (minutes, positive).
    pub duration_min: i64,
}

impl Session {
    /// Creates a new session.
    pub fn new(id: impl Into<String>, date_day: i64, start_min: i64, duration_min: i64) -> Self {
        Self {
            id: id.into(),
            date_day,
            start_min,
            duration_min,
        }
    }

    /// Creates a session from calendar date and time of day.
    pub fn on_date(
        id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        duration_min: i64,
    ) -> Self {
        Self::new(
            id,
            ordinal_day(date),
            minutes_since_midnight(start),
            duration_min,
        )
    }

    /// Session close time (minutes since midnight).
    #[inline]
    pub fn end_min(&self) -> i64 {
        self.start_min + self.duration_min
    }
}

//! Calendar conversions for the scheduling model.
//!
//! The model compares dates and times linearly, so calendar values are
//! flattened to integers at the boundary:
//! - dates become **ordinal days** (proleptic Gregorian day count,
//!   0001-01-01 = day 1);
//! - times of day become **minutes since midnight**.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Minutes in a day; the default planning horizon for case start times.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Converts a calendar date to an ordinal day count.
///
/// 0001-01-01 maps to day 1, so differences between ordinal days are
/// calendar-day differences.
#[inline]
pub fn ordinal_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// Converts a time of day to minutes elapsed since midnight.
///
/// Seconds are truncated: session timetables are minute-granular.
#[inline]
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

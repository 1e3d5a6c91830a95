//! CSV input loading.
//!
//! Reads the two tabular datasets a planning run starts from and
//! converts their calendar fields at the boundary:
//!
//! - **Cases**: `CaseID`, `Expected Duration` (minutes),
//!   `TargetDeadline` (`DD/MM/YYYY`)
//! - **Sessions**: `SessionID`, `Date` (`DD/MM/YYYY`), `Start`
//!   (`HH:MM:SS`), `Duration` (minutes)
//!
//! Malformed rows are fatal ([`LoadError`]), never coerced; structural
//! checks beyond parsing (unique IDs, positive durations) belong to
//! [`validation`](crate::validation).

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Case, Session};

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Errors raised while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened.
    #[error("failed to open input file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV structure or cell type did not match the expected columns.
    #[error("CSV parse failure: {0}")]
    Csv(#[from] csv::Error),

    /// A date cell did not match `DD/MM/YYYY`.
    #[error("row {row}: invalid date '{value}' (expected DD/MM/YYYY)")]
    Date { row: usize, value: String },

    /// A time cell did not match `HH:MM:SS`.
    #[error("row {row}: invalid time '{value}' (expected HH:MM:SS)")]
    Time { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    #[serde(rename = "CaseID")]
    case_id: String,
    #[serde(rename = "Expected Duration")]
    duration_min: i64,
    #[serde(rename = "TargetDeadline")]
    deadline: String,
}

#[derive(Debug, Deserialize)]
struct SessionRow {
    #[serde(rename = "SessionID")]
    session_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Start")]
    start: String,
    #[serde(rename = "Duration")]
    duration_min: i64,
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LoadError::Date {
        row,
        value: value.to_string(),
    })
}

fn parse_time(value: &str, row: usize) -> Result<NaiveTime, LoadError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| LoadError::Time {
        row,
        value: value.to_string(),
    })
}

/// Loads the surgical waiting list from a CSV file.
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<Case>, LoadError> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut cases = Vec::new();
    for (idx, result) in reader.deserialize::<CaseRow>().enumerate() {
        let row = result?;
        let deadline = parse_date(&row.deadline, idx + 1)?;
        cases.push(Case::with_deadline_date(
            row.case_id,
            row.duration_min,
            deadline,
        ));
    }
    Ok(cases)
}

/// Loads the session calendar from a CSV file.
pub fn load_sessions(path: impl AsRef<Path>) -> Result<Vec<Session>, LoadError> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut sessions = Vec::new();
    for (idx, result) in reader.deserialize::<SessionRow>().enumerate() {
        let row = result?;
        let date = parse_date(&row.date, idx + 1)?;
        let start = parse_time(&row.start, idx + 1)?;
        sessions.push(Session::on_date(
            row.session_id,
            date,
            start,
            row.duration_min,
        ));
    }
    Ok(sessions)
}

//! Operating-theatre scheduling via mixed-integer linear programming.
//!
//! Turns a surgical waiting list and a session calendar into a feasible
//! timetable: every scheduled case meets its clinical deadline, no two
//! cases in a session overlap, and total theatre utilization is
//! maximized. The heart of the crate is the constraint model — the
//! translation of cases, sessions, deadlines, and non-overlap
//! requirements into explicit linear rows, including the disjunctive
//! before/after encoding via big-M linearization.
//!
//! # Modules
//!
//! - **`models`**: Domain types — [`Case`], [`Session`], calendar
//!   conversions
//! - **`validation`**: Input integrity checks (duplicate IDs,
//!   non-positive durations)
//! - **`milp`**: [`ModelBuilder`], disjunction enumeration, and the
//!   assembled [`TheatreModel`]
//! - **`solver`**: The [`SolverBackend`] seam with greedy and
//!   (feature `milp`) CBC backends
//! - **`report`**: [`ScheduleReport`] — per-task decisions,
//!   assigned/missed cases, per-session utilization
//! - **`loader`**: CSV ingestion for the two input datasets
//!
//! # Pipeline
//!
//! One-shot and synchronous: build the model, hand it to a backend,
//! interpret the assignment. Each run owns its model; nothing is shared
//! across runs.
//!
//! ```
//! use theatre_schedule::{build_model, solve, SolveOptions};
//! use theatre_schedule::models::{Case, Session};
//!
//! let cases = vec![
//!     Case::new("C1", 60, 740_010),
//!     Case::new("C2", 90, 740_005),
//! ];
//! let sessions = vec![Session::new("S1", 740_003, 480, 200)];
//!
//! let model = build_model(&cases, &sessions, Default::default()).unwrap();
//! let report = solve(&model, &SolveOptions::default()).unwrap();
//! assert_eq!(report.assigned_count(), 2);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Ku & Beck (2016), "Mixed Integer Programming Models for Job Shop
//!   Scheduling: A Computational Analysis"
//! - Williams (2013), "Model Building in Mathematical Programming"

pub mod error;
pub mod loader;
pub mod milp;
pub mod models;
pub mod report;
pub mod solver;
pub mod validation;

pub use error::ScheduleError;
pub use milp::{ModelBuilder, ModelConfig, TheatreModel};
pub use models::{Case, Session};
pub use report::{ScheduleReport, SolveStatus, TaskRecord};
pub use solver::{solve, solve_with, SolveOptions, SolverBackend};

/// Builds a scheduling model from the waiting list and session calendar.
///
/// Convenience wrapper over [`ModelBuilder`]; see
/// [`ModelConfig`] for the tunables (utilization cap, horizon, big-M).
///
/// # Errors
/// [`ScheduleError::InvalidInput`] or [`ScheduleError::BigMTooSmall`].
pub fn build_model(
    cases: &[Case],
    sessions: &[Session],
    config: ModelConfig,
) -> Result<TheatreModel, ScheduleError> {
    ModelBuilder::new(cases, sessions).with_config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_model_convenience() {
        let cases = vec![Case::new("C1", 60, 10)];
        let sessions = vec![Session::new("S1", 5, 480, 240)];
        let model = build_model(&cases, &sessions, ModelConfig::default()).unwrap();
        assert_eq!(model.cases().len(), 1);
        assert_eq!(model.sessions().len(), 1);
    }

    #[test]
    fn test_build_model_propagates_validation() {
        let cases = vec![Case::new("C1", -1, 10)];
        let sessions = vec![Session::new("S1", 5, 480, 240)];
        assert!(build_model(&cases, &sessions, ModelConfig::default()).is_err());
    }
}

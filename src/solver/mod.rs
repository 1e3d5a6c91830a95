//! Solver backends.
//!
//! The model is solved through the [`SolverBackend`] seam: the core
//! neither inspects nor reimplements solver internals, it hands over the
//! assembled variables/constraints/objective and a time budget, and gets
//! back a value per variable plus a normalized status. Partial results
//! (the best incumbent when the budget runs out) are a valid, non-error
//! outcome.
//!
//! Two backends ship with the crate:
//!
//! - [`GreedyBackend`]: earliest-deadline-first first-fit baseline.
//!   Always available, never proves optimality.
//! - `CbcBackend` (feature `milp`): real MILP solving through
//!   `good_lp`/CBC, honoring the time limit via CBC's `sec` parameter.

mod greedy;
#[cfg(feature = "milp")]
mod milp_backend;

pub use greedy::GreedyBackend;
#[cfg(feature = "milp")]
pub use milp_backend::CbcBackend;

use tracing::info;

use crate::error::ScheduleError;
use crate::milp::TheatreModel;
use crate::report::ScheduleReport;

/// Solve-time options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    /// Time budget for the backend, in seconds.
    pub time_limit_secs: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        // Matches the five-minute budget theatre planning runs are
        // usually given.
        Self {
            time_limit_secs: 300,
        }
    }
}

impl SolveOptions {
    /// Creates options with the given time budget.
    pub fn with_time_limit(time_limit_secs: u64) -> Self {
        Self { time_limit_secs }
    }
}

/// Normalized backend outcome, independent of any solver's own status
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// The returned values are proven optimal.
    ProvenOptimal,
    /// The returned values are feasible but not proven optimal
    /// (time budget exhausted, or a heuristic backend).
    Incumbent,
    /// No feasible assignment exists.
    Infeasible,
}

/// A raw variable assignment produced by a backend.
#[derive(Debug, Clone)]
pub struct RawSolution {
    /// Normalized outcome.
    pub status: BackendStatus,
    /// One value per model variable, indexed by
    /// [`VarId::index`](crate::milp::VarId::index). Empty when
    /// infeasible.
    pub values: Vec<f64>,
    /// Objective value of the assignment.
    pub objective: f64,
}

/// A solver backend consuming the assembled model.
pub trait SolverBackend {
    /// Backend name, for diagnostics.
    fn name(&self) -> &str;

    /// Solves the model within the given options.
    ///
    /// Infeasibility is a status, not an error; `Err` means the backend
    /// itself failed.
    fn solve(
        &self,
        model: &TheatreModel,
        options: &SolveOptions,
    ) -> Result<RawSolution, ScheduleError>;
}

/// Solves a model with the default backend and interprets the result.
///
/// The default backend is `CbcBackend` when the `milp` feature is
/// enabled, [`GreedyBackend`] otherwise.
pub fn solve(
    model: &TheatreModel,
    options: &SolveOptions,
) -> Result<ScheduleReport, ScheduleError> {
    #[cfg(feature = "milp")]
    let backend = CbcBackend::default();
    #[cfg(not(feature = "milp"))]
    let backend = GreedyBackend::default();

    solve_with(&backend, model, options)
}

/// Solves a model with an explicit backend and interprets the result.
pub fn solve_with(
    backend: &dyn SolverBackend,
    model: &TheatreModel,
    options: &SolveOptions,
) -> Result<ScheduleReport, ScheduleError> {
    let raw = backend.solve(model, options)?;
    let report = ScheduleReport::from_solution(model, &raw);
    info!(
        backend = backend.name(),
        status = ?report.status,
        assigned = report.assigned_count(),
        missed = report.missed_count(),
        objective = report.objective,
        "solve finished"
    );
    Ok(report)
}

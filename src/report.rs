//! Scheduling report (solution interpretation).
//!
//! Turns a raw solver assignment back into planner-facing terms: which
//! cases got a session, which were missed, where and when each assigned
//! case starts, and how full each session is. The report is structured
//! data for a caller to format, not console text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::milp::TheatreModel;
use crate::solver::{BackendStatus, RawSolution};

/// Binary-variable rounding threshold: solver values above this count
/// as "assigned".
const ASSIGNED_THRESHOLD: f64 = 0.5;

/// Normalized solve outcome.
///
/// Infeasibility is distinct from "feasible with zero assignments", and
/// a timeout is never conflated with infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal within the time budget.
    Optimal,
    /// Best incumbent without an optimality proof: the time budget
    /// expired, or the backend is a heuristic.
    FeasibleTimeout,
    /// The backend proved no feasible assignment exists.
    Infeasible,
}

/// Per-task scheduling decision.
///
/// One record exists for every candidate (case, session) pair, assigned
/// or not — the same shape the per-task results table of a solve run has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Case identifier.
    pub case_id: String,
    /// Session identifier.
    pub session_id: String,
    /// Session date (ordinal day).
    pub session_day: i64,
    /// Case deadline (ordinal day).
    pub deadline_day: i64,
    /// Days before deadline: `deadline - session date`.
    pub slack_days: i64,
    /// Case start time (minutes since midnight). Only operationally
    /// meaningful when `assigned` is true; otherwise a slack value.
    pub start_min: f64,
    /// Whether the case is scheduled into this session.
    pub assigned: bool,
}

/// Structured outcome of a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Normalized solve status.
    pub status: SolveStatus,
    /// Objective value (sum of session utilizations).
    pub objective: f64,
    /// One record per candidate (case, session) pair, task-index order.
    pub records: Vec<TaskRecord>,
    /// Cases with exactly one assigned session, in input order.
    pub assigned_cases: Vec<String>,
    /// Cases without a session, in input order.
    pub missed_cases: Vec<String>,
    /// Utilization fraction per session.
    pub utilization_by_session: HashMap<String, f64>,
}

impl ScheduleReport {
    /// Interprets a raw solver solution against its model.
    ///
    /// An infeasible solution produces a uniform report shape: every
    /// record unassigned, every case missed, zero utilization.
    pub fn from_solution(model: &TheatreModel, raw: &RawSolution) -> Self {
        let status = match raw.status {
            BackendStatus::ProvenOptimal => SolveStatus::Optimal,
            BackendStatus::Incumbent => SolveStatus::FeasibleTimeout,
            BackendStatus::Infeasible => SolveStatus::Infeasible,
        };

        if status == SolveStatus::Infeasible {
            return Self::all_missed(model, status);
        }

        let mut records = Vec::with_capacity(model.cases().len() * model.sessions().len());
        let mut assigned_cases = Vec::new();
        let mut missed_cases = Vec::new();

        for (c, case) in model.cases().iter().enumerate() {
            let mut case_assigned = false;
            for (s, session) in model.sessions().iter().enumerate() {
                let assigned =
                    raw.values[model.assigned_var(c, s).index()] > ASSIGNED_THRESHOLD;
                case_assigned |= assigned;
                records.push(TaskRecord {
                    case_id: case.id.clone(),
                    session_id: session.id.clone(),
                    session_day: session.date_day,
                    deadline_day: case.deadline_day,
                    slack_days: case.slack_days(session.date_day),
                    start_min: raw.values[model.start_var(c, s).index()],
                    assigned,
                });
            }
            if case_assigned {
                assigned_cases.push(case.id.clone());
            } else {
                missed_cases.push(case.id.clone());
            }
        }

        Self {
            status,
            objective: raw.objective,
            records,
            assigned_cases,
            missed_cases,
            utilization_by_session: model.utilization_values(&raw.values),
        }
    }

    fn all_missed(model: &TheatreModel, status: SolveStatus) -> Self {
        let mut records = Vec::new();
        for case in model.cases() {
            for session in model.sessions() {
                records.push(TaskRecord {
                    case_id: case.id.clone(),
                    session_id: session.id.clone(),
                    session_day: session.date_day,
                    deadline_day: case.deadline_day,
                    slack_days: case.slack_days(session.date_day),
                    start_min: 0.0,
                    assigned: false,
                });
            }
        }
        Self {
            status,
            objective: 0.0,
            records,
            assigned_cases: Vec::new(),
            missed_cases: model.cases().iter().map(|c| c.id.clone()).collect(),
            utilization_by_session: model
                .sessions()
                .iter()
                .map(|s| (s.id.clone(), 0.0))
                .collect(),
        }
    }

    /// Number of assigned cases.
    pub fn assigned_count(&self) -> usize {
        self.assigned_cases.len()
    }

    /// Number of missed cases.
    pub fn missed_count(&self) -> usize {
        self.missed_cases.len()
    }

    /// Whether the solver proved the model infeasible.
    pub fn is_infeasible(&self) -> bool {
        self.status == SolveStatus::Infeasible
    }

    /// Whether the result is an incumbent without an optimality proof.
    pub fn timed_out(&self) -> bool {
        self.status == SolveStatus::FeasibleTimeout
    }

    /// The record for a specific (case, session) pair.
    pub fn record_for(&self, case_id: &str, session_id: &str) -> Option<&TaskRecord> {
        self.records
            .iter()
            .find(|r| r.case_id == case_id && r.session_id == session_id)
    }

    /// The assigned record for a case, if it got a session.
    pub fn assignment_for_case(&self, case_id: &str) -> Option<&TaskRecord> {
        self.records
            .iter()
            .find(|r| r.assigned && r.case_id == case_id)
    }
}

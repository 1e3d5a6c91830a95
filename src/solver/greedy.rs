//! Greedy baseline backend.
//!
//! Earliest-deadline-first, first-fit packing: cases are taken in
//! deadline order and placed at the first session (by date) that
//! respects their deadline and still has capacity under the utilization
//! cap. Cases in a session are packed back to back from the session
//! start, so containment and non-overlap hold by construction.
//!
//! The result is feasible for the full model but carries no optimality
//! proof, so the backend always reports an incumbent.

use tracing::debug;

use super::{BackendStatus, RawSolution, SolveOptions, SolverBackend};
use crate::error::ScheduleError;
use crate::milp::TheatreModel;

/// Earliest-deadline-first first-fit heuristic.
#[derive(Debug, Clone, Default)]
pub struct GreedyBackend;

impl GreedyBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for GreedyBackend {
    fn name(&self) -> &str {
        "greedy"
    }

    fn solve(
        &self,
        model: &TheatreModel,
        _options: &SolveOptions,
    ) -> Result<RawSolution, ScheduleError> {
        let cases = model.cases();
        let sessions = model.sessions();
        let mut values = vec![0.0; model.var_count()];

        // Deadline order for cases, date order for sessions; ties keep
        // input order.
        let mut case_order: Vec<usize> = (0..cases.len()).collect();
        case_order.sort_by_key(|&c| (cases[c].deadline_day, c));
        let mut session_order: Vec<usize> = (0..sessions.len()).collect();
        session_order.sort_by_key(|&s| (sessions[s].date_day, s));

        // Minutes already packed into each session.
        let mut used_min = vec![0i64; sessions.len()];
        // (case index, start minute) per session, for ordering binaries.
        let mut placed: Vec<Vec<(usize, i64)>> = vec![Vec::new(); sessions.len()];
        let mut assigned_count = 0usize;

        for &c in &case_order {
            let case = &cases[c];
            for &s in &session_order {
                let session = &sessions[s];
                if session.date_day > case.deadline_day {
                    continue;
                }
                // The utilization cap bounds total assigned minutes;
                // it is tighter than the session close itself.
                let capacity_min = model.max_utilization() * session.duration_min as f64;
                if (used_min[s] + case.duration_min) as f64 > capacity_min + 1e-9 {
                    continue;
                }

                let start = session.start_min + used_min[s];
                values[model.assigned_var(c, s).index()] = 1.0;
                values[model.start_var(c, s).index()] = start as f64;
                used_min[s] += case.duration_min;
                placed[s].push((c, start));
                assigned_count += 1;
                break;
            }
        }

        // Ordering binaries for co-assigned pairs; pairs with an
        // unassigned member are fully relaxed and keep the default 0.
        for (d_idx, d) in model.disjunctions().iter().enumerate() {
            let in_session = &placed[d.session];
            let start_a = in_session.iter().find(|(c, _)| *c == d.case_a);
            let start_b = in_session.iter().find(|(c, _)| *c == d.case_b);
            if let (Some((_, a)), Some((_, b))) = (start_a, start_b) {
                if a < b {
                    values[model.before_var(d_idx).index()] = 1.0;
                }
            }
        }

        let mut objective = 0.0;
        for (s, session) in sessions.iter().enumerate() {
            let util = used_min[s] as f64 / session.duration_min as f64;
            values[model.utilization_var(s).index()] = util;
            objective += util;
        }

        debug!(
            assigned = assigned_count,
            cases = cases.len(),
            objective,
            "greedy packing finished"
        );

        // A first-fit heuristic never proves optimality.
        Ok(RawSolution {
            status: BackendStatus::Incumbent,
            values,
            objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::ModelBuilder;
    use crate::models::{Case, Session};

    #[test]
    fn test_greedy_prefers_earliest_deadline() {
        // Capacity for only one case; B has the tighter deadline and
        // must win even though A comes first in the input.
        let cases = vec![Case::new("A", 100, 20), Case::new("B", 100, 5)];
        let sessions = vec![Session::new("S1", 3, 480, 140)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let raw = GreedyBackend::new()
            .solve(&model, &SolveOptions::default())
            .unwrap();
        assert_eq!(raw.status, BackendStatus::Incumbent);
        assert!(raw.values[model.assigned_var(1, 0).index()] > 0.5);
        assert!(raw.values[model.assigned_var(0, 0).index()] < 0.5);
    }

    #[test]
    fn test_greedy_respects_utilization_cap() {
        // 100-min session, cap 0.85: 85 usable minutes. Two 45-min
        // cases would fit the raw duration but not the cap.
        let cases = vec![Case::new("A", 45, 10), Case::new("B", 45, 10)];
        let sessions = vec![Session::new("S1", 3, 480, 100)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let raw = GreedyBackend::new()
            .solve(&model, &SolveOptions::default())
            .unwrap();
        let assigned: f64 = [0, 1]
            .iter()
            .map(|&c| raw.values[model.assigned_var(c, 0).index()])
            .sum();
        assert!((assigned - 1.0).abs() < 1e-9);
        assert!(raw.values[model.utilization_var(0).index()] <= 0.85 + 1e-9);
    }

    #[test]
    fn test_greedy_spills_to_later_session() {
        let cases = vec![Case::new("A", 90, 10), Case::new("B", 90, 10)];
        let sessions = vec![
            Session::new("S1", 3, 480, 120),
            Session::new("S2", 4, 480, 120),
        ];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let raw = GreedyBackend::new()
            .solve(&model, &SolveOptions::default())
            .unwrap();
        // 120 * 0.85 = 102: one 90-min case per session.
        assert!(raw.values[model.assigned_var(0, 0).index()] > 0.5);
        assert!(raw.values[model.assigned_var(1, 1).index()] > 0.5);
    }

    #[test]
    fn test_greedy_sets_consistent_ordering_binaries() {
        let cases = vec![
            Case::new("A", 30, 10),
            Case::new("B", 30, 10),
            Case::new("C", 30, 10),
        ];
        let sessions = vec![Session::new("S1", 3, 480, 200)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let raw = GreedyBackend::new()
            .solve(&model, &SolveOptions::default())
            .unwrap();
        // All three are packed; the full solution must satisfy every
        // disjunction row.
        assert!(model.violated_constraints(&raw.values, 1e-6).is_empty());
    }

    #[test]
    fn test_greedy_empty_input() {
        let model = ModelBuilder::new(&[], &[]).build().unwrap();
        let raw = GreedyBackend::new()
            .solve(&model, &SolveOptions::default())
            .unwrap();
        assert!(raw.values.is_empty());
        assert!((raw.objective - 0.0).abs() < 1e-10);
    }
}

//! Model construction.
//!
//! Translates the case/session registry into the six constraint families
//! of the scheduling model, with the disjunctive non-overlap requirement
//! linearized through an explicit big-M encoding.
//!
//! # Constraint families
//!
//! For every task (case `c`, session `s`), with `a = assigned[c,s]`,
//! `t = start[c,s]`, and big-M constant `M`:
//!
//! 1. start after session open: `t >= open_s - (1 - a)*M`
//! 2. end before session close: `t + dur_c <= close_s + (1 - a)*M`
//! 3. at most one session per case: `sum_s a[c,s] <= 1`
//! 4. deadline: `date_s <= deadline_c + (1 - a)*M`
//! 5. mutual non-overlap per disjunction (a, b, s), with ordering binary
//!    `y = before[a,b,s]`:
//!    `t_a + dur_a <= t_b + (1 - y)*M + (2 - a_a - a_b)*M` and
//!    `t_b + dur_b <= t_a + y*M + (2 - a_a - a_b)*M`
//! 6. utilization definition:
//!    `util_s == sum_c (dur_c / dur_s) * a[c,s]`
//!
//! Families 1, 2 and 4 are deactivated by the big-M slack whenever the
//! task is unassigned; family 5 is deactivated unless BOTH cases are
//! assigned to the session, and then the ordering binary selects which
//! inequality binds. Family 4 is generated for every task, including
//! pairs that can never fit by duration — the slack neutralizes them.
//!
//! # Big-M
//!
//! A single scalar M deactivates relaxed constraints. It must dominate
//! every finite quantity in the model (durations, session close times,
//! the horizon, date differences) without being so large that it
//! ill-conditions the solve; the default is `1000 * 1440`. `build()`
//! refuses an M smaller than 10x the largest quantity in the data.
//!
//! # Reference
//! - Ku & Beck (2016), "Mixed Integer Programming Models for Job Shop
//!   Scheduling: A Computational Analysis"
//! - Williams (2013), "Model Building in Mathematical Programming", Ch. 9

use tracing::info;

use super::disjunction::enumerate_disjunctions;
use super::model::{
    LinearConstraint, LinearExpr, Sense, TheatreModel, VarDef, VarDomain, VarId,
};
use crate::error::ScheduleError;
use crate::models::{Case, Session, MINUTES_PER_DAY};
use crate::validation::validate_input;

/// Model construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Cap on each session's utilization fraction (operational buffer).
    pub max_utilization: f64,
    /// Upper bound for case start times (minutes).
    pub horizon_min: i64,
    /// The big-M deactivation constant.
    pub big_m: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_utilization: 0.85,
            horizon_min: MINUTES_PER_DAY,
            big_m: 1000.0 * MINUTES_PER_DAY as f64,
        }
    }
}

/// Builds a [`TheatreModel`] from the case and session collections.
///
/// # Example
/// ```
/// use theatre_schedule::milp::ModelBuilder;
/// use theatre_schedule::models::{Case, Session};
///
/// let cases = vec![Case::new("C1", 60, 100)];
/// let sessions = vec![Session::new("S1", 95, 480, 240)];
/// let model = ModelBuilder::new(&cases, &sessions).build().unwrap();
/// assert_eq!(model.var_count(), 3); // assigned, start, utilization
/// ```
pub struct ModelBuilder<'a> {
    cases: &'a [Case],
    sessions: &'a [Session],
    config: ModelConfig,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with default configuration.
    pub fn new(cases: &'a [Case], sessions: &'a [Session]) -> Self {
        Self {
            cases,
            sessions,
            config: ModelConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the utilization cap (default 0.85).
    pub fn with_max_utilization(mut self, max_utilization: f64) -> Self {
        self.config.max_utilization = max_utilization;
        self
    }

    /// Sets the start-time horizon in minutes (default 1440).
    pub fn with_horizon(mut self, horizon_min: i64) -> Self {
        self.config.horizon_min = horizon_min;
        self
    }

    /// Sets the big-M constant (default `1000 * 1440`).
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.config.big_m = big_m;
        self
    }

    /// Validates the input and assembles the model.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidInput`] on structural input problems;
    /// [`ScheduleError::BigMTooSmall`] when the configured M does not
    /// dominate the data by at least 10x.
    pub fn build(self) -> Result<TheatreModel, ScheduleError> {
        validate_input(self.cases, self.sessions).map_err(ScheduleError::InvalidInput)?;

        let max_quantity = self.largest_model_quantity();
        if self.config.big_m < 10.0 * max_quantity {
            return Err(ScheduleError::BigMTooSmall {
                big_m: self.config.big_m,
                max_quantity,
            });
        }

        let n_cases = self.cases.len();
        let n_sessions = self.sessions.len();
        let n_tasks = n_cases * n_sessions;
        let m = self.config.big_m;
        let horizon = self.config.horizon_min as f64;

        let mut vars: Vec<VarDef> = Vec::with_capacity(2 * n_tasks + n_sessions);
        let add_var = |vars: &mut Vec<VarDef>, name: String, domain: VarDomain| -> VarId {
            let id = VarId(vars.len());
            vars.push(VarDef { name, domain });
            id
        };

        // Decision variables, task-major (all sessions of case 0, ...).
        let mut assigned = Vec::with_capacity(n_tasks);
        let mut start = Vec::with_capacity(n_tasks);
        for case in self.cases {
            for session in self.sessions {
                assigned.push(add_var(
                    &mut vars,
                    format!("assigned[{},{}]", case.id, session.id),
                    VarDomain::Binary,
                ));
                start.push(add_var(
                    &mut vars,
                    format!("start[{},{}]", case.id, session.id),
                    VarDomain::Continuous {
                        lower: 0.0,
                        upper: horizon,
                    },
                ));
            }
        }

        let mut utilization = Vec::with_capacity(n_sessions);
        for session in self.sessions {
            utilization.push(add_var(
                &mut vars,
                format!("utilization[{}]", session.id),
                VarDomain::Continuous {
                    lower: 0.0,
                    upper: self.config.max_utilization,
                },
            ));
        }

        let disjunctions = enumerate_disjunctions(n_cases, n_sessions);
        let mut before = Vec::with_capacity(disjunctions.len());
        for d in &disjunctions {
            before.push(add_var(
                &mut vars,
                format!(
                    "before[{},{},{}]",
                    self.cases[d.case_a].id, self.cases[d.case_b].id, self.sessions[d.session].id
                ),
                VarDomain::Binary,
            ));
        }

        let task = |case: usize, session: usize| case * n_sessions + session;
        let mut constraints = Vec::new();

        // Family 1: case start must be at or after the session opens.
        // start - M*assigned >= open - M
        for (c, case) in self.cases.iter().enumerate() {
            for (s, session) in self.sessions.iter().enumerate() {
                let t = task(c, s);
                constraints.push(LinearConstraint {
                    name: format!("case_start[{},{}]", case.id, session.id),
                    lhs: LinearExpr::new()
                        .term(start[t], 1.0)
                        .term(assigned[t], -m),
                    sense: Sense::Geq,
                    rhs: session.start_min as f64 - m,
                });
            }
        }

        // Family 2: case end must be at or before the session closes.
        // start + M*assigned <= close - dur + M
        for (c, case) in self.cases.iter().enumerate() {
            for (s, session) in self.sessions.iter().enumerate() {
                let t = task(c, s);
                constraints.push(LinearConstraint {
                    name: format!("case_end[{},{}]", case.id, session.id),
                    lhs: LinearExpr::new().term(start[t], 1.0).term(assigned[t], m),
                    sense: Sense::Leq,
                    rhs: session.end_min() as f64 - case.duration_min as f64 + m,
                });
            }
        }

        // Family 3: a case is assigned to at most one session.
        for (c, case) in self.cases.iter().enumerate() {
            let mut lhs = LinearExpr::new();
            for s in 0..n_sessions {
                lhs = lhs.term(assigned[task(c, s)], 1.0);
            }
            constraints.push(LinearConstraint {
                name: format!("single_session[{}]", case.id),
                lhs,
                sense: Sense::Leq,
                rhs: 1.0,
            });
        }

        // Family 4: the session date must respect the case deadline when
        // assigned. Generated for every task; big-M slack neutralizes the
        // rest. M*assigned <= deadline - date + M
        for (c, case) in self.cases.iter().enumerate() {
            for (s, session) in self.sessions.iter().enumerate() {
                constraints.push(LinearConstraint {
                    name: format!("deadline[{},{}]", case.id, session.id),
                    lhs: LinearExpr::new().term(assigned[task(c, s)], m),
                    sense: Sense::Leq,
                    rhs: (case.deadline_day - session.date_day) as f64 + m,
                });
            }
        }

        // Family 5: mutual non-overlap. Either a finishes before b starts
        // or b finishes before a starts; both rows are slack unless both
        // cases are assigned to the session.
        for (d_idx, d) in disjunctions.iter().enumerate() {
            let case_a = &self.cases[d.case_a];
            let case_b = &self.cases[d.case_b];
            let session = &self.sessions[d.session];
            let ta = task(d.case_a, d.session);
            let tb = task(d.case_b, d.session);
            let y = before[d_idx];

            // start_a + dur_a <= start_b + (1-y)*M + (2 - a_a - a_b)*M
            constraints.push(LinearConstraint {
                name: format!(
                    "no_overlap[{},{},{}]:a_first",
                    case_a.id, case_b.id, session.id
                ),
                lhs: LinearExpr::new()
                    .term(start[ta], 1.0)
                    .term(start[tb], -1.0)
                    .term(y, m)
                    .term(assigned[ta], m)
                    .term(assigned[tb], m),
                sense: Sense::Leq,
                rhs: 3.0 * m - case_a.duration_min as f64,
            });

            // start_b + dur_b <= start_a + y*M + (2 - a_a - a_b)*M
            constraints.push(LinearConstraint {
                name: format!(
                    "no_overlap[{},{},{}]:b_first",
                    case_a.id, case_b.id, session.id
                ),
                lhs: LinearExpr::new()
                    .term(start[tb], 1.0)
                    .term(start[ta], -1.0)
                    .term(y, -m)
                    .term(assigned[ta], m)
                    .term(assigned[tb], m),
                sense: Sense::Leq,
                rhs: 2.0 * m - case_b.duration_min as f64,
            });
        }

        // Family 6: utilization is the fraction of the session consumed
        // by its assigned cases. Session durations are validated positive.
        for (s, session) in self.sessions.iter().enumerate() {
            let mut lhs = LinearExpr::new().term(utilization[s], 1.0);
            for (c, case) in self.cases.iter().enumerate() {
                lhs = lhs.term(
                    assigned[task(c, s)],
                    -(case.duration_min as f64) / session.duration_min as f64,
                );
            }
            constraints.push(LinearConstraint {
                name: format!("utilization[{}]", session.id),
                lhs,
                sense: Sense::Eq,
                rhs: 0.0,
            });
        }

        // Objective: maximize total session utilization.
        let mut objective = LinearExpr::new();
        for &util in &utilization {
            objective = objective.term(util, 1.0);
        }

        info!(
            cases = n_cases,
            sessions = n_sessions,
            variables = vars.len(),
            constraints = constraints.len(),
            disjunctions = disjunctions.len(),
            big_m = m,
            "built theatre scheduling model"
        );

        Ok(TheatreModel {
            cases: self.cases.to_vec(),
            sessions: self.sessions.to_vec(),
            vars,
            constraints,
            objective,
            assigned,
            start,
            utilization,
            before,
            disjunctions,
            big_m: m,
            max_utilization: self.config.max_utilization,
            horizon_min: self.config.horizon_min,
        })
    }

    /// Largest finite quantity appearing in the constraint rows: the
    /// horizon, case durations, session close times, and the full span of
    /// session dates and deadlines.
    fn largest_model_quantity(&self) -> f64 {
        let mut max_quantity = self.config.horizon_min as f64;

        for case in self.cases {
            max_quantity = max_quantity.max(case.duration_min as f64);
        }
        for session in self.sessions {
            max_quantity = max_quantity.max(session.end_min() as f64);
        }

        let days = self
            .sessions
            .iter()
            .map(|s| s.date_day)
            .chain(self.cases.iter().map(|c| c.deadline_day));
        let min_day = days.clone().min();
        let max_day = days.max();
        if let (Some(lo), Some(hi)) = (min_day, max_day) {
            max_quantity = max_quantity.max((hi - lo) as f64);
        }

        max_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::model::VarDomain;

    fn two_case_fixture() -> (Vec<Case>, Vec<Session>) {
        // Both cases fit the session by duration and deadline.
        let cases = vec![Case::new("A", 60, 10), Case::new("B", 90, 5)];
        let sessions = vec![Session::new("S1", 3, 480, 200)];
        (cases, sessions)
    }

    /// All-zero solution vector for a model.
    fn zeros(model: &TheatreModel) -> Vec<f64> {
        vec![0.0; model.var_count()]
    }

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert!((config.max_utilization - 0.85).abs() < 1e-10);
        assert_eq!(config.horizon_min, 1440);
        assert!((config.big_m - 1_440_000.0).abs() < 1e-10);
    }

    #[test]
    fn test_variable_and_constraint_counts() {
        let cases = vec![
            Case::new("A", 60, 100),
            Case::new("B", 90, 100),
            Case::new("C", 30, 100),
        ];
        let sessions = vec![Session::new("S1", 95, 480, 240), Session::new("S2", 96, 480, 240)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let tasks = 6;
        let pairs = 3; // C(3,2)
        let disjunctions = pairs * 2;
        assert_eq!(model.disjunctions().len(), disjunctions);
        // assigned + start per task, utilization per session, before per triple
        assert_eq!(model.var_count(), 2 * tasks + 2 + disjunctions);
        // families 1, 2, 4 per task; 3 per case; 5 twice per triple; 6 per session
        assert_eq!(
            model.constraint_count(),
            3 * tasks + 3 + 2 * disjunctions + 2
        );
    }

    #[test]
    fn test_task_enumeration_is_case_major() {
        let cases = vec![Case::new("A", 60, 100), Case::new("B", 90, 100)];
        let sessions = vec![Session::new("S1", 95, 480, 240), Session::new("S2", 96, 480, 240)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let tasks: Vec<_> = model.tasks().collect();
        assert_eq!(tasks.len(), 4);
        for (idx, task) in tasks.iter().enumerate() {
            assert_eq!(model.task_index(task.case, task.session), idx);
        }
        // Variable names line up with the task layout.
        let var = &model.variables()[model.assigned_var(1, 0).index()];
        assert_eq!(var.name, "assigned[B,S1]");
    }

    #[test]
    fn test_variable_bounds() {
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let assigned = &model.variables()[model.assigned_var(0, 0).index()];
        assert_eq!(assigned.domain, VarDomain::Binary);

        let start = &model.variables()[model.start_var(0, 0).index()];
        assert_eq!(
            start.domain,
            VarDomain::Continuous {
                lower: 0.0,
                upper: 1440.0
            }
        );

        let util = &model.variables()[model.utilization_var(0).index()];
        assert_eq!(
            util.domain,
            VarDomain::Continuous {
                lower: 0.0,
                upper: 0.85
            }
        );
    }

    #[test]
    fn test_invalid_input_rejected() {
        let cases = vec![Case::new("A", 60, 10), Case::new("A", 90, 5)];
        let sessions = vec![Session::new("S1", 3, 480, 200)];
        let err = ModelBuilder::new(&cases, &sessions).build().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_session_duration_rejected() {
        let cases = vec![Case::new("A", 60, 10)];
        let sessions = vec![Session::new("S1", 3, 480, 0)];
        let err = ModelBuilder::new(&cases, &sessions).build().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_big_m_too_small_rejected() {
        let (cases, sessions) = two_case_fixture();
        let err = ModelBuilder::new(&cases, &sessions)
            .with_big_m(5000.0)
            .build()
            .unwrap_err();
        match err {
            ScheduleError::BigMTooSmall { big_m, max_quantity } => {
                assert!((big_m - 5000.0).abs() < 1e-10);
                assert!(max_quantity >= 1440.0);
            }
            other => panic!("expected BigMTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_big_m_must_cover_date_span() {
        // A deadline ~40 years out makes the date span the dominant
        // quantity; the default M still covers it, a 10x-of-horizon M
        // does not.
        let cases = vec![Case::new("A", 60, 750_000)];
        let sessions = vec![Session::new("S1", 735_000, 480, 240)];
        assert!(ModelBuilder::new(&cases, &sessions).build().is_ok());

        let err = ModelBuilder::new(&cases, &sessions)
            .with_big_m(14_400.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ScheduleError::BigMTooSmall { .. }));
    }

    #[test]
    fn test_empty_assignment_is_feasible() {
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();
        let values = zeros(&model);
        assert!(model.violated_constraints(&values, 1e-6).is_empty());
    }

    #[test]
    fn test_packed_assignment_is_feasible() {
        // Scenario: A (60 min) and B (90 min) both fit a 200-min session
        // starting at minute 480 on day 3; utilization 150/200 = 0.75.
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let mut values = zeros(&model);
        values[model.assigned_var(0, 0).index()] = 1.0;
        values[model.start_var(0, 0).index()] = 480.0;
        values[model.assigned_var(1, 0).index()] = 1.0;
        values[model.start_var(1, 0).index()] = 540.0;
        values[model.before_var(0).index()] = 1.0; // A finishes before B
        values[model.utilization_var(0).index()] = 0.75;

        assert!(model.violated_constraints(&values, 1e-6).is_empty());
        assert!((model.objective().eval(&values) - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_overlap_violates_a_disjunction_row() {
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let mut values = zeros(&model);
        values[model.assigned_var(0, 0).index()] = 1.0;
        values[model.start_var(0, 0).index()] = 480.0;
        values[model.assigned_var(1, 0).index()] = 1.0;
        values[model.start_var(1, 0).index()] = 500.0; // overlaps A's [480, 540)
        values[model.utilization_var(0).index()] = 0.75;

        // Whichever way the ordering binary is set, one row must fail.
        for y in [0.0, 1.0] {
            values[model.before_var(0).index()] = y;
            let violated = model.violated_constraints(&values, 1e-6);
            assert!(
                violated.iter().any(|name| name.starts_with("no_overlap")),
                "y={y}: expected a no_overlap violation, got {violated:?}"
            );
        }
    }

    #[test]
    fn test_deadline_violation_is_caught() {
        // Session on day 5, deadline day 2: assignment must violate the
        // deadline row even though the case fits by duration.
        let cases = vec![Case::new("A", 60, 2)];
        let sessions = vec![Session::new("S1", 5, 480, 200)];
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let mut values = zeros(&model);
        values[model.assigned_var(0, 0).index()] = 1.0;
        values[model.start_var(0, 0).index()] = 480.0;
        values[model.utilization_var(0).index()] = 0.3;

        let violated = model.violated_constraints(&values, 1e-6);
        assert!(violated.contains(&"deadline[A,S1]"));

        // Unassigned, the same task is unconstrained by its deadline.
        let values = zeros(&model);
        assert!(model.violated_constraints(&values, 1e-6).is_empty());
    }

    #[test]
    fn test_containment_violation_is_caught() {
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        // B (90 min) starting at 600 would end at 690 > close 680.
        let mut values = zeros(&model);
        values[model.assigned_var(1, 0).index()] = 1.0;
        values[model.start_var(1, 0).index()] = 600.0;
        values[model.utilization_var(0).index()] = 0.45;

        let violated = model.violated_constraints(&values, 1e-6);
        assert!(violated.contains(&"case_end[B,S1]"));
    }

    #[test]
    fn test_utilization_definition_is_enforced() {
        let (cases, sessions) = two_case_fixture();
        let model = ModelBuilder::new(&cases, &sessions).build().unwrap();

        let mut values = zeros(&model);
        values[model.assigned_var(0, 0).index()] = 1.0;
        values[model.start_var(0, 0).index()] = 480.0;
        values[model.utilization_var(0).index()] = 0.5; // should be 60/200

        let violated = model.violated_constraints(&values, 1e-6);
        assert!(violated.contains(&"utilization[S1]"));

        values[model.utilization_var(0).index()] = 0.3;
        assert!(model.violated_constraints(&values, 1e-6).is_empty());
    }
}

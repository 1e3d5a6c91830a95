//! Typed MILP model object.
//!
//! The model is plain data: a variable table, a list of linear
//! constraints, and a maximized objective. No symbolic rewriting happens
//! after construction — the big-M linearization is already explicit in
//! the constraint rows — so any backend can consume the model by walking
//! these collections, and tests can check candidate solutions against
//! individual rows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Case, Session};

/// Handle to a decision variable; indexes the model's variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position in the model's variable table (and in solution value
    /// vectors).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VarDomain {
    /// 0/1 decision.
    Binary,
    /// Bounded continuous value.
    Continuous { lower: f64, upper: f64 },
}

/// A decision variable: name plus domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDef {
    /// Diagnostic name, e.g. `assigned[C1,S2]`.
    pub name: String,
    /// Domain and bounds.
    pub domain: VarDomain,
}

/// Linear expression `sum(coeff * var) + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Coefficient terms.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Creates an empty (zero) expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `coeff * var` term.
    pub fn term(mut self, var: VarId, coeff: f64) -> Self {
        self.terms.push((var, coeff));
        self
    }

    /// Evaluates the expression against a value-per-variable vector.
    pub fn eval(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.0])
            .sum::<f64>()
            + self.constant
    }
}

/// Constraint comparison sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `lhs <= rhs`
    Leq,
    /// `lhs >= rhs`
    Geq,
    /// `lhs == rhs`
    Eq,
}

/// A single linear constraint row: `lhs <sense> rhs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Diagnostic name, e.g. `deadline[C1,S2]`.
    pub name: String,
    /// Variable side of the row.
    pub lhs: LinearExpr,
    /// Comparison sense.
    pub sense: Sense,
    /// Constant side of the row.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Whether a candidate solution satisfies this row within `tol`.
    pub fn satisfied_by(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.lhs.eval(values);
        match self.sense {
            Sense::Leq => lhs <= self.rhs + tol,
            Sense::Geq => lhs >= self.rhs - tol,
            Sense::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}

/// A candidate (case, session) pairing, by index into the model's
/// case and session collections.
///
/// A task is not an assignment — it is a candidate whose fate is decided
/// by the `assigned` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRef {
    /// Case index.
    pub case: usize,
    /// Session index.
    pub session: usize,
}

/// An unordered pair of distinct cases competing for one session,
/// stored in canonical order (`case_a < case_b` by index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disjunction {
    /// First case index (smaller).
    pub case_a: usize,
    /// Second case index (larger).
    pub case_b: usize,
    /// Session index.
    pub session: usize,
}

/// The assembled scheduling model.
///
/// Holds the case/session registry snapshot, the decision variables
/// (`assigned`, `start`, `utilization`, plus one `before` ordering
/// indicator per disjunction), the six constraint families as explicit
/// rows, and the maximized utilization objective. Built fresh per
/// scheduling run by [`ModelBuilder`](super::ModelBuilder) and discarded
/// after solving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TheatreModel {
    pub(crate) cases: Vec<Case>,
    pub(crate) sessions: Vec<Session>,
    pub(crate) vars: Vec<VarDef>,
    pub(crate) constraints: Vec<LinearConstraint>,
    pub(crate) objective: LinearExpr,
    /// `assigned[c,s]`, indexed by task index.
    pub(crate) assigned: Vec<VarId>,
    /// `start[c,s]`, indexed by task index.
    pub(crate) start: Vec<VarId>,
    /// `utilization[s]`, indexed by session.
    pub(crate) utilization: Vec<VarId>,
    /// `before[a,b,s]`, indexed parallel to `disjunctions`.
    pub(crate) before: Vec<VarId>,
    pub(crate) disjunctions: Vec<Disjunction>,
    pub(crate) big_m: f64,
    pub(crate) max_utilization: f64,
    pub(crate) horizon_min: i64,
}

impl TheatreModel {
    /// Cases in input order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Sessions in input order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The variable table.
    pub fn variables(&self) -> &[VarDef] {
        &self.vars
    }

    /// All constraint rows, in generation order (families 1 through 6).
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The maximized objective (sum of session utilizations).
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// The deduplicated disjunction triples.
    pub fn disjunctions(&self) -> &[Disjunction] {
        &self.disjunctions
    }

    /// The configured big-M constant.
    pub fn big_m(&self) -> f64 {
        self.big_m
    }

    /// The utilization cap applied to every session.
    pub fn max_utilization(&self) -> f64 {
        self.max_utilization
    }

    /// The start-time horizon (minutes).
    pub fn horizon_min(&self) -> i64 {
        self.horizon_min
    }

    /// Number of decision variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraint rows.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Flat task index for a (case, session) index pair.
    ///
    /// Tasks are laid out case-major: all sessions of case 0, then
    /// case 1, and so on.
    #[inline]
    pub fn task_index(&self, case: usize, session: usize) -> usize {
        case * self.sessions.len() + session
    }

    /// Iterates the full task set (Cartesian product of cases and
    /// sessions) in task-index order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskRef> + '_ {
        let sessions = self.sessions.len();
        (0..self.cases.len()).flat_map(move |case| {
            (0..sessions).map(move |session| TaskRef { case, session })
        })
    }

    /// The `assigned` variable for a task.
    pub fn assigned_var(&self, case: usize, session: usize) -> VarId {
        self.assigned[self.task_index(case, session)]
    }

    /// The `start` variable for a task.
    pub fn start_var(&self, case: usize, session: usize) -> VarId {
        self.start[self.task_index(case, session)]
    }

    /// The `utilization` variable for a session.
    pub fn utilization_var(&self, session: usize) -> VarId {
        self.utilization[session]
    }

    /// The `before` ordering variable for a disjunction (by position in
    /// [`disjunctions`](Self::disjunctions)).
    pub fn before_var(&self, disjunction: usize) -> VarId {
        self.before[disjunction]
    }

    /// Looks up a case index by ID.
    pub fn case_index(&self, case_id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id == case_id)
    }

    /// Looks up a session index by ID.
    pub fn session_index(&self, session_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == session_id)
    }

    /// Checks a candidate solution against every constraint row.
    ///
    /// Returns the names of violated rows. Empty means feasible within
    /// `tol`. Intended for tests and post-solve auditing, not for the
    /// solve path.
    pub fn violated_constraints(&self, values: &[f64], tol: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.satisfied_by(values, tol))
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Per-session utilization from a solution value vector.
    pub fn utilization_values(&self, values: &[f64]) -> HashMap<String, f64> {
        self.sessions
            .iter()
            .enumerate()
            .map(|(s, session)| (session.id.clone(), values[self.utilization[s].0]))
            .collect()
    }
}

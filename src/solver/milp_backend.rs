//! MILP backend through `good_lp`/CBC.
//!
//! Maps the model's variable table and constraint rows one-to-one onto a
//! `good_lp` problem and hands it to CBC. The time budget is forwarded
//! through CBC's `sec` parameter; a solution returned after the budget
//! elapsed is classified as an incumbent rather than proven optimal.

use std::time::Instant;

use good_lp::constraint;
use good_lp::{
    default_solver, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::debug;

use super::{BackendStatus, RawSolution, SolveOptions, SolverBackend};
use crate::error::ScheduleError;
use crate::milp::{LinearExpr, Sense, TheatreModel, VarDomain};

/// CBC-backed MILP solver.
#[derive(Debug, Clone, Default)]
pub struct CbcBackend;

impl CbcBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant);
    for (var, coeff) in &expr.terms {
        out += *coeff * vars[var.index()];
    }
    out
}

impl SolverBackend for CbcBackend {
    fn name(&self) -> &str {
        "cbc"
    }

    fn solve(
        &self,
        model: &TheatreModel,
        options: &SolveOptions,
    ) -> Result<RawSolution, ScheduleError> {
        let mut problem_vars = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .variables()
            .iter()
            .map(|def| match def.domain {
                VarDomain::Binary => {
                    problem_vars.add(good_lp::variable().binary().name(def.name.as_str()))
                }
                VarDomain::Continuous { lower, upper } => problem_vars.add(
                    good_lp::variable()
                        .min(lower)
                        .max(upper)
                        .name(def.name.as_str()),
                ),
            })
            .collect();

        let objective = to_expression(model.objective(), &vars);
        let mut problem = problem_vars.maximise(objective).using(default_solver);
        problem.set_parameter("sec", &options.time_limit_secs.to_string());
        problem.set_parameter("log", "0");

        for row in model.constraints() {
            let lhs = to_expression(&row.lhs, &vars);
            let c = match row.sense {
                Sense::Leq => constraint::leq(lhs, row.rhs),
                Sense::Geq => constraint::geq(lhs, row.rhs),
                Sense::Eq => constraint::eq(lhs, row.rhs),
            };
            problem = problem.with(c);
        }

        let started = Instant::now();
        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = vars.iter().map(|v| solution.value(*v)).collect();
                let objective = model.objective().eval(&values);
                let elapsed = started.elapsed().as_secs();
                let status = if elapsed >= options.time_limit_secs {
                    BackendStatus::Incumbent
                } else {
                    BackendStatus::ProvenOptimal
                };
                debug!(elapsed, objective, "CBC solve returned");
                Ok(RawSolution {
                    status,
                    values,
                    objective,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(RawSolution {
                status: BackendStatus::Infeasible,
                values: Vec::new(),
                objective: 0.0,
            }),
            Err(err) => Err(ScheduleError::Solver {
                backend: self.name().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

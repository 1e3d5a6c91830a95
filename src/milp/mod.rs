//! MILP formulation of the theatre scheduling problem.
//!
//! Translates cases, sessions, deadlines and non-overlap requirements
//! into a linear mixed-integer model:
//!
//! - [`ModelBuilder`]: decision variables, the six constraint families,
//!   and the utilization objective
//! - [`disjunction`]: enumeration of case-pair-per-session conflicts
//! - [`TheatreModel`]: the assembled model as explicit data, consumable
//!   by any [`SolverBackend`](crate::solver::SolverBackend)
//!
//! The disjunctive "one case fully precedes the other" requirement is
//! linearized with a big-M encoding; see [`builder`] for the exact rows.

pub mod builder;
pub mod disjunction;
pub mod model;

pub use builder::{ModelBuilder, ModelConfig};
pub use disjunction::enumerate_disjunctions;
pub use model::{
    Disjunction, LinearConstraint, LinearExpr, Sense, TaskRef, TheatreModel, VarDef, VarDomain,
    VarId,
};

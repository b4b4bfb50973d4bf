//! The static CSP instance: variables, extensional constraints, and the
//! aggregate problem they belong to.
//!
//! Everything in this module is immutable once built. The solver never
//! narrows a declared domain in place; it works on its own persistent copies
//! (see [`crate::solver::solution::Solution`]).

pub mod constraint;
pub mod problem;
pub mod variable;

pub use constraint::{Constraint, ConstraintId};
pub use problem::Csp;
pub use variable::{Variable, VariableId};

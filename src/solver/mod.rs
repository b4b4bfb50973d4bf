//! A backtracking search engine over extensional CSP instances.
//!
//! The engine is split along the classic seams: a [`strategy::SearchStrategy`]
//! drives the tree search, a [`propagate::Propagator`] prunes domains after
//! each assignment, and [`heuristics`] decide branching order. Search states
//! are persistent ([`solution::Solution`]), so backtracking never undoes
//! mutations.

pub mod heuristics;
pub mod propagate;
pub mod solution;
pub mod stats;
pub mod strategy;
pub mod work_list;

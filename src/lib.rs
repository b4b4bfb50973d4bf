//! Futoshiki puzzles formulated as constraint satisfaction problems.
//!
//! A Futoshiki board is an n×n Latin-square-style grid with optional
//! pre-filled cells and strict-inequality markers between horizontally
//! adjacent cells. This crate turns such a board into an extensional CSP
//! instance (variables, ordered integer domains, and constraints carrying
//! their explicit satisfying-tuple sets) and ships a backtracking solver
//! to search it.
//!
//! # Core Concepts
//!
//! - **[`board::Board`]**: the validated wire format: rows of `2n - 1`
//!   slots alternating cell values and `<`/`>`/`.` markers.
//! - **Two encodings** of the row/column all-different structure:
//!   [`model::binary::build_binary_model`] (many pairwise not-equal
//!   constraints, cheap tuples, weaker pruning) and
//!   [`model::nary::build_nary_model`] (one all-different constraint per
//!   line over all `n!` permutations, stronger pruning, factorial memory).
//!   Both encode the inequality markers identically, and both are pure
//!   builders: no search happens until a strategy is invoked.
//! - **[`solver::strategy::BacktrackingSearch`]**: depth-first search with a
//!   pluggable [`solver::propagate::Propagator`]: plain assignment
//!   checking, forward checking, or generalized arc consistency.
//!
//! # Example
//!
//! Solve the 3×3 puzzle with a `>` between the first two cells of row 0, a
//! fixed `2` at the end of row 0, and a `<` in row 2:
//!
//! ```
//! use futoshiki_csp::board::Slot;
//! use futoshiki_csp::model::binary::build_binary_model;
//! use futoshiki_csp::solver::propagate::ArcConsistency;
//! use futoshiki_csp::solver::solution::Solution;
//! use futoshiki_csp::solver::strategy::{BacktrackingSearch, SearchStrategy};
//!
//! let rows: Vec<Vec<Slot>> =
//!     serde_json::from_str(r#"[[0,">",0,".",2],[0,".",0,".",0],[0,".",0,"<",0]]"#).unwrap();
//!
//! let (csp, grid) = build_binary_model(&rows).unwrap();
//! let solver = BacktrackingSearch::with_defaults(Box::new(ArcConsistency));
//! let (solution, _stats) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
//!
//! let solved = grid.to_grid(&solution.unwrap()).unwrap();
//! assert_eq!(
//!     solved,
//!     vec![vec![3, 1, 2], vec![2, 3, 1], vec![1, 2, 3]],
//! );
//! ```

pub mod board;
pub mod csp;
pub mod error;
pub mod model;
pub mod solver;

//! Futoshiki model construction: translating a raw board into a CSP
//! instance a generic search strategy can consume.
//!
//! Two encodings are provided, trading constraint arity for propagation
//! strength:
//!
//! - [`binary::build_binary_model`] decomposes every row and column into
//!   pairwise not-equal constraints. Many small constraints with cheap
//!   tuple sets, but pairwise pruning misses infeasibilities an
//!   all-different view would catch.
//! - [`nary::build_nary_model`] emits one all-different constraint per row
//!   and per column, materializing all `n!` permutations of `1..=n` as its
//!   tuple set. Far fewer constraints and much stronger pruning under
//!   generalized arc consistency, at factorially growing memory cost.
//!
//! Both encodings share the board parser, the cell registration step, and
//! the construction of the binary ordering constraints for `<`/`>` markers.
//! Neither invokes the solver: a build is a pure function from a board to
//! an immutable problem definition, and an infeasible board (say, two fixed
//! cells contradicting a marker) still builds successfully; its ordering
//! constraint just carries an empty tuple set for the search to trip over.

pub mod binary;
pub mod grid;
pub mod nary;

use itertools::Itertools;

pub use crate::model::grid::VariableGrid;
use crate::{
    board::{Board, Ordering},
    csp::{Constraint, Csp, Variable},
    error::Result,
};

/// Registers one variable per cell, named after its `(row, col)` position:
/// domain `1..=n` for an empty cell, a singleton for a pre-filled one.
fn register_cells(board: &Board, csp: &mut Csp) -> VariableGrid {
    let n = board.n();
    let vars = (0..n)
        .map(|row| {
            (0..n)
                .map(|col| {
                    let domain = match board.cell(row, col) {
                        0 => (1..=n as i64).collect(),
                        fixed => vec![fixed],
                    };
                    csp.add_variable(Variable::new(format!("cell_{row}_{col}"), domain))
                })
                .collect()
        })
        .collect();
    VariableGrid::new(vars)
}

/// The cross product of two domains filtered to the pairs satisfying the
/// strict ordering. Both models attach exactly this tuple set to an
/// annotated adjacent pair.
fn ordering_tuples(left: &[i64], right: &[i64], ordering: Ordering) -> Vec<Vec<i64>> {
    left.iter()
        .cartesian_product(right)
        .filter(|&(&a, &b)| ordering.holds(a, b))
        .map(|(&a, &b)| vec![a, b])
        .collect()
}

/// Adds one binary ordering constraint per `<`/`>` marker on the board.
fn add_inequality_constraints(board: &Board, csp: &mut Csp, grid: &VariableGrid) -> Result<()> {
    for inequality in board.inequalities() {
        let left = grid.var(inequality.row, inequality.left);
        let right = grid.var(inequality.row, inequality.left + 1);
        let tuples = ordering_tuples(
            csp.variable(left).domain(),
            csp.variable(right).domain(),
            inequality.ordering,
        );
        let name = format!(
            "ineq_{}_{}_{}",
            inequality.row,
            inequality.left,
            inequality.left + 1
        );
        csp.add_constraint(Constraint::new(name, vec![left, right]).with_satisfying_tuples(tuples))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        board::Slot,
        solver::{
            propagate::{ArcConsistency, AssignmentChecking, ForwardChecking, Propagator},
            solution::Solution,
            strategy::{BacktrackingSearch, SearchStrategy},
        },
    };

    fn example_rows() -> Vec<Vec<Slot>> {
        serde_json::from_str(r#"[[0,">",0,".",2],[0,".",0,".",0],[0,".",0,"<",0]]"#).unwrap()
    }

    fn propagators() -> Vec<Box<dyn Propagator>> {
        vec![
            Box::new(AssignmentChecking),
            Box::new(ForwardChecking),
            Box::new(ArcConsistency),
        ]
    }

    #[test]
    fn ordering_tuples_keep_only_the_requested_direction() {
        let tuples = ordering_tuples(&[1, 2, 3], &[1, 2, 3], Ordering::Less);
        assert_eq!(tuples, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);

        let tuples = ordering_tuples(&[1, 2], &[1, 2], Ordering::Greater);
        assert_eq!(tuples, vec![vec![2, 1]]);
    }

    #[test]
    fn conflicting_fixed_cells_yield_an_empty_tuple_set() {
        assert!(ordering_tuples(&[1], &[2], Ordering::Greater).is_empty());
    }

    #[test]
    fn both_models_solve_the_example_to_the_same_unique_solution() {
        let _ = tracing_subscriber::fmt::try_init();
        let expected = vec![vec![3, 1, 2], vec![2, 3, 1], vec![1, 2, 3]];

        for build in [binary::build_binary_model, nary::build_nary_model] {
            for propagator in propagators() {
                let (csp, grid) = build(&example_rows()).unwrap();
                let solver = BacktrackingSearch::with_defaults(propagator);
                let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
                let solution = solution.unwrap();
                assert_eq!(grid.value_at(&solution, 0, 0), Some(3));
                let solved = grid.to_grid(&solution).unwrap();
                assert_eq!(solved, expected);
            }
        }
    }

    #[test]
    fn a_marker_contradicting_fixed_cells_builds_but_cannot_be_solved() {
        // 1 > 2 is false, so the ordering constraint is built with an empty
        // tuple set; the builder stays declarative and the search reports
        // the infeasibility.
        let rows: Vec<Vec<Slot>> =
            serde_json::from_str(r#"[[1,">",2],[0,".",0]]"#).unwrap();

        for build in [binary::build_binary_model, nary::build_nary_model] {
            for propagator in propagators() {
                let (csp, _) = build(&rows).unwrap();
                let empty = csp
                    .constraints()
                    .iter()
                    .find(|c| c.name() == "ineq_0_0_1")
                    .unwrap();
                assert_eq!(empty.num_satisfying_tuples(), 0);

                let solver = BacktrackingSearch::with_defaults(propagator);
                let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
                assert!(solution.is_none());
            }
        }
    }

    #[cfg(test)]
    mod prop_tests {
        use proptest::prelude::*;

        use super::*;
        use pretty_assertions::assert_eq;
        use crate::model::grid::VariableGrid;

        /// A solved grid, the wire-format puzzle derived from it, and the
        /// count of markers placed on it.
        type GeneratedPuzzle = (Vec<Vec<i64>>, Vec<Vec<Slot>>, usize);

        fn relabel(grid: &mut [Vec<i64>], a: i64, b: i64) {
            for row in grid.iter_mut() {
                for cell in row.iter_mut() {
                    if *cell == a {
                        *cell = b;
                    } else if *cell == b {
                        *cell = a;
                    }
                }
            }
        }

        fn swap_cols(grid: &mut [Vec<i64>], c1: usize, c2: usize) {
            for row in grid.iter_mut() {
                row.swap(c1, c2);
            }
        }

        // A valid random Futoshiki instance: start from the cyclic Latin
        // square, scramble it with Latin-preserving transformations, poke
        // holes, and annotate some adjacent pairs with the ordering the
        // solved grid actually has.
        fn puzzle_strategy() -> impl Strategy<Value = GeneratedPuzzle> {
            (3..=4usize).prop_flat_map(|n| {
                let transformations =
                    proptest::collection::vec((0..3usize, 0..n, 0..n), 0..20);
                let holes = proptest::collection::hash_set((0..n, 0..n), 0..=n * n);
                let marker_flags = proptest::collection::vec(any::<bool>(), n * (n - 1));

                (Just(n), transformations, holes, marker_flags).prop_map(
                    |(n, transformations, holes, marker_flags)| {
                        let mut solved: Vec<Vec<i64>> = (0..n)
                            .map(|r| (0..n).map(|c| ((r + c) % n + 1) as i64).collect())
                            .collect();
                        for (op, a, b) in transformations {
                            match op {
                                0 => relabel(&mut solved, a as i64 + 1, b as i64 + 1),
                                1 => solved.swap(a, b),
                                _ => swap_cols(&mut solved, a, b),
                            }
                        }

                        let mut marker_count = 0;
                        let rows = (0..n)
                            .map(|r| {
                                let mut row = Vec::with_capacity(2 * n - 1);
                                for c in 0..n {
                                    let value = if holes.contains(&(r, c)) {
                                        0
                                    } else {
                                        solved[r][c]
                                    };
                                    row.push(Slot::Cell(value));
                                    if c + 1 < n {
                                        let marker = if marker_flags[r * (n - 1) + c] {
                                            marker_count += 1;
                                            if solved[r][c] < solved[r][c + 1] {
                                                crate::board::Marker::Less
                                            } else {
                                                crate::board::Marker::Greater
                                            }
                                        } else {
                                            crate::board::Marker::None
                                        };
                                        row.push(Slot::Marker(marker));
                                    }
                                }
                                row
                            })
                            .collect();
                        (solved, rows, marker_count)
                    },
                )
            })
        }

        /// Latin rows and columns, fixed cells kept, every marker satisfied.
        fn assert_valid_solution(solved: &[Vec<i64>], rows: &[Vec<Slot>], grid: &VariableGrid) {
            let n = solved.len();
            let full: Vec<i64> = (1..=n as i64).collect();
            for r in 0..n {
                let mut row: Vec<i64> = solved[r].clone();
                row.sort();
                assert_eq!(row, full, "row {r} is not a permutation");
            }
            for c in 0..n {
                let mut col: Vec<i64> = (0..n).map(|r| solved[r][c]).collect();
                col.sort();
                assert_eq!(col, full, "column {c} is not a permutation");
            }
            let board = Board::parse(rows).unwrap();
            for r in 0..n {
                for c in 0..n {
                    if board.cell(r, c) != 0 {
                        assert_eq!(solved[r][c], board.cell(r, c));
                    }
                }
            }
            for inequality in board.inequalities() {
                let left = solved[inequality.row][inequality.left];
                let right = solved[inequality.row][inequality.left + 1];
                assert!(inequality.ordering.holds(left, right));
            }
            assert_eq!(grid.n(), n);
        }

        proptest! {
            #[test]
            fn both_models_solve_generated_puzzles((_, rows, marker_count) in puzzle_strategy()) {
                let n = (rows[0].len() + 1) / 2;

                let (binary_csp, binary_grid) = binary::build_binary_model(&rows).unwrap();
                let (nary_csp, nary_grid) = nary::build_nary_model(&rows).unwrap();

                // The constraint-graph shape is fixed by the encoding.
                let not_equal = binary_csp
                    .constraints()
                    .iter()
                    .filter(|c| c.name().starts_with("ne_"))
                    .count();
                prop_assert_eq!(not_equal, 2 * n * (n * (n - 1) / 2));
                let alldiff = nary_csp
                    .constraints()
                    .iter()
                    .filter(|c| c.name().starts_with("alldiff_"))
                    .count();
                prop_assert_eq!(alldiff, 2 * n);
                let count_ineq = |csp: &crate::csp::Csp| {
                    csp.constraints()
                        .iter()
                        .filter(|c| c.name().starts_with("ineq_"))
                        .count()
                };
                prop_assert_eq!(count_ineq(&binary_csp), marker_count);
                prop_assert_eq!(count_ineq(&nary_csp), marker_count);

                // Generated from a valid solved grid, the puzzle must be
                // solvable under either encoding, and any solution found
                // must be a valid Futoshiki solution.
                let solver = BacktrackingSearch::with_defaults(Box::new(ArcConsistency));
                for (csp, grid) in [(binary_csp, binary_grid), (nary_csp, nary_grid)] {
                    let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
                    let solution = solution.expect("a generated puzzle must be solvable");
                    let solved = grid.to_grid(&solution).unwrap();
                    assert_valid_solution(&solved, &rows, &grid);
                }
            }
        }
    }
}

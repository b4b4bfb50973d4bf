//! Model 1: the binary encoding.
//!
//! Every row and column relation is decomposed into pairwise not-equal
//! constraints, `C(n, 2)` per line and `O(n³)` across the grid,
//! each of arity 2 with an `O(n²)` tuple set. Cheap to enumerate and simple
//! to propagate pairwise, but unable to see infeasibilities that only show
//! up when a whole line is considered at once.

use itertools::Itertools;

use crate::{
    board::Board,
    csp::{Constraint, Csp},
    error::Result,
    model::{add_inequality_constraints, register_cells, VariableGrid},
};

/// Builds the binary-encoded CSP instance for a raw board.
///
/// Returns the instance together with the variable grid used to read the
/// solution back after search.
pub fn build_binary_model(rows: &[Vec<crate::board::Slot>]) -> Result<(Csp, VariableGrid)> {
    let board = Board::parse(rows)?;
    let n = board.n();
    let mut csp = Csp::new("futoshiki_binary");
    let grid = register_cells(&board, &mut csp);

    for row in 0..n {
        for (j, k) in (0..n).tuple_combinations() {
            let (a, b) = (grid.var(row, j), grid.var(row, k));
            let tuples = not_equal_tuples(csp.variable(a).domain(), csp.variable(b).domain());
            let name = format!("ne_row_{row}_{j}_{k}");
            csp.add_constraint(Constraint::new(name, vec![a, b]).with_satisfying_tuples(tuples))?;
        }
    }
    for col in 0..n {
        for (i, k) in (0..n).tuple_combinations() {
            let (a, b) = (grid.var(i, col), grid.var(k, col));
            let tuples = not_equal_tuples(csp.variable(a).domain(), csp.variable(b).domain());
            let name = format!("ne_col_{col}_{i}_{k}");
            csp.add_constraint(Constraint::new(name, vec![a, b]).with_satisfying_tuples(tuples))?;
        }
    }

    add_inequality_constraints(&board, &mut csp, &grid)?;
    Ok((csp, grid))
}

/// The cross product of the two domains filtered to unequal pairs.
fn not_equal_tuples(left: &[i64], right: &[i64]) -> Vec<Vec<i64>> {
    left.iter()
        .cartesian_product(right)
        .filter(|&(&a, &b)| a != b)
        .map(|(&a, &b)| vec![a, b])
        .collect()
}

//! Model 2: the n-ary encoding.
//!
//! Each row and each column becomes a single all-different constraint over
//! its n cells, whose tuple set is every permutation of `1..=n`: for a
//! Latin-square-style grid the only value sets a line can take. The tuples
//! are deliberately *not* filtered against declared domains: a fixed cell's
//! singleton domain rules out the incompatible permutations during search,
//! when the solver intersects tuples with current domains. One constraint
//! per line gives generalized arc consistency much more to work with than
//! the pairwise decomposition, at `n!` tuples of memory per constraint.

use itertools::Itertools;

use crate::{
    board::Board,
    csp::{Constraint, Csp},
    error::Result,
    model::{add_inequality_constraints, register_cells, VariableGrid},
};

/// Builds the n-ary-encoded CSP instance for a raw board.
///
/// Returns the instance together with the variable grid used to read the
/// solution back after search.
pub fn build_nary_model(rows: &[Vec<crate::board::Slot>]) -> Result<(Csp, VariableGrid)> {
    let board = Board::parse(rows)?;
    let n = board.n();
    let mut csp = Csp::new("futoshiki_nary");
    let grid = register_cells(&board, &mut csp);

    // A single variable is trivially all-different; only lines of two or
    // more cells get a constraint.
    if n > 1 {
        let permutations: Vec<Vec<i64>> = (1..=n as i64).permutations(n).collect();
        for row in 0..n {
            let con = Constraint::new(format!("alldiff_row_{row}"), grid.row(row).to_vec())
                .with_satisfying_tuples(permutations.iter().cloned());
            csp.add_constraint(con)?;
        }
        for col in 0..n {
            let con = Constraint::new(format!("alldiff_col_{col}"), grid.column(col))
                .with_satisfying_tuples(permutations.iter().cloned());
            csp.add_constraint(con)?;
        }
    }

    add_inequality_constraints(&board, &mut csp, &grid)?;
    Ok((csp, grid))
}

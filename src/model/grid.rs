use crate::{csp::VariableId, solver::solution::Solution};

/// The n×n grid of variable handles a builder returns alongside its CSP
/// instance, indexed like the logical board.
///
/// This is the caller's stable handle for reading the solution back once a
/// search strategy has finished: the same ids index the domains of any
/// [`Solution`] derived from the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableGrid {
    vars: Vec<Vec<VariableId>>,
}

impl VariableGrid {
    pub(crate) fn new(vars: Vec<Vec<VariableId>>) -> Self {
        Self { vars }
    }

    /// The side length of the board.
    pub fn n(&self) -> usize {
        self.vars.len()
    }

    /// The variable for the cell at `(row, col)`.
    pub fn var(&self, row: usize, col: usize) -> VariableId {
        self.vars[row][col]
    }

    /// The variables of one row, left to right.
    pub fn row(&self, row: usize) -> &[VariableId] {
        &self.vars[row]
    }

    /// The variables of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<VariableId> {
        self.vars.iter().map(|row| row[col]).collect()
    }

    /// The assigned value of the cell at `(row, col)`, if the search has
    /// narrowed it to a single value.
    pub fn value_at(&self, solution: &Solution, row: usize, col: usize) -> Option<i64> {
        solution.value_of(self.var(row, col))
    }

    /// The full solved grid in row-major order, or `None` while any cell is
    /// still unassigned.
    pub fn to_grid(&self, solution: &Solution) -> Option<Vec<Vec<i64>>> {
        self.vars
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&var| solution.value_of(var))
                    .collect::<Option<Vec<i64>>>()
            })
            .collect()
    }
}

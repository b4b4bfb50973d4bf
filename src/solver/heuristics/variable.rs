//! Heuristics for selecting which variable to branch on next.

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{csp::VariableId, solver::solution::Solution};

/// A variable-selection heuristic.
///
/// Implementors choose which unassigned variable the solver branches on
/// next. A good choice can dramatically shrink the search tree.
pub trait VariableSelectionHeuristic {
    /// Selects the next variable to be assigned, or `None` if every domain
    /// is already a singleton.
    fn select_variable(&self, solution: &Solution) -> Option<VariableId>;
}

/// Selects the unassigned variable with the smallest id.
///
/// This provides a basic, deterministic way to select variables.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(&self, solution: &Solution) -> Option<VariableId> {
        solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(var_id, _)| *var_id)
            .map(|(var_id, _)| *var_id)
    }
}

/// Selects the variable with the Minimum Remaining Values in its domain.
///
/// A "fail-first" strategy: branching on the most constrained variable
/// prunes the search space earliest. Ties break towards the lower variable
/// id so the search stays deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl VariableSelectionHeuristic for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, solution: &Solution) -> Option<VariableId> {
        solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(var_id, domain)| (domain.len(), **var_id))
            .map(|(var_id, _)| *var_id)
    }
}

/// Selects an unassigned variable at random.
///
/// Useful under a restart policy: each attempt explores the tree in a
/// different order. Seeded construction keeps test runs reproducible.
pub struct RandomVariableHeuristic {
    rng: RefCell<ChaCha8Rng>,
}

impl RandomVariableHeuristic {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl VariableSelectionHeuristic for RandomVariableHeuristic {
    fn select_variable(&self, solution: &Solution) -> Option<VariableId> {
        use rand::seq::IteratorRandom;

        let unassigned: Vec<VariableId> = solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .map(|(var_id, _)| *var_id)
            .collect();

        unassigned.into_iter().choose(&mut *self.rng.borrow_mut())
    }
}

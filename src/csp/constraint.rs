use std::collections::HashSet;

use crate::csp::VariableId;

/// Identifies a constraint within one [`crate::csp::Csp`].
pub type ConstraintId = usize;

/// An extensional constraint: an ordered scope of variables together with
/// the explicit set of value tuples that satisfy it.
///
/// Tuples are listed in scope order, so `tuple[i]` is the value taken by
/// `scope()[i]`. An empty satisfying set is a legal (if unsatisfiable)
/// constraint; the builders construct one when two fixed cells contradict an
/// inequality marker, and leave infeasibility detection to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    name: String,
    scope: Vec<VariableId>,
    satisfying: HashSet<Vec<i64>>,
}

impl Constraint {
    /// Creates a constraint with an empty satisfying set.
    pub fn new(name: impl Into<String>, scope: Vec<VariableId>) -> Self {
        Self {
            name: name.into(),
            scope,
            satisfying: HashSet::new(),
        }
    }

    /// Attaches satisfying tuples. Must be called before the constraint
    /// participates in search; arity is validated when the constraint is
    /// registered with a [`crate::csp::Csp`].
    pub fn add_satisfying_tuples(&mut self, tuples: impl IntoIterator<Item = Vec<i64>>) {
        self.satisfying.extend(tuples);
    }

    /// Builder-style variant of [`Self::add_satisfying_tuples`].
    pub fn with_satisfying_tuples(mut self, tuples: impl IntoIterator<Item = Vec<i64>>) -> Self {
        self.add_satisfying_tuples(tuples);
        self
    }

    /// The name is only used for debugging and traceability.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    pub fn satisfying_tuples(&self) -> impl Iterator<Item = &[i64]> {
        self.satisfying.iter().map(Vec::as_slice)
    }

    pub fn num_satisfying_tuples(&self) -> usize {
        self.satisfying.len()
    }

    /// Whether the full assignment `tuple` (in scope order) satisfies this
    /// constraint.
    pub fn is_satisfied_by(&self, tuple: &[i64]) -> bool {
        self.satisfying.contains(tuple)
    }

    /// Whether some satisfying tuple assigns `value` at scope position
    /// `position` while every other component lies in its variable's current
    /// domain, as reported by `contains`.
    ///
    /// This is the single support check that both forward checking and
    /// generalized arc consistency are built from. Tuples holding values a
    /// variable can no longer take simply fail the check, which is how fixed
    /// cells are enforced against Model 2's unfiltered permutation tuples.
    pub fn has_support(
        &self,
        position: usize,
        value: i64,
        contains: impl Fn(VariableId, i64) -> bool,
    ) -> bool {
        self.satisfying.iter().any(|tuple| {
            tuple[position] == value
                && tuple
                    .iter()
                    .enumerate()
                    .all(|(i, &v)| i == position || contains(self.scope[i], v))
        })
    }
}

use im::{HashMap, OrdSet};

use crate::csp::{Csp, VariableId};

/// The current domain of one variable during search.
pub type Domain = OrdSet<i64>;
/// A map from each variable's id to its current domain.
pub type Domains = HashMap<VariableId, Domain>;

/// A single, immutable state in the solver's search space.
///
/// A `Solution` holds the current domain of possible values for every
/// variable in the problem. Because it uses persistent (immutable) data
/// structures, it can be cloned cheaply: assigning a variable or pruning a
/// domain creates a new `Solution` rather than modifying the existing one,
/// so backtracking is simply dropping a state.
#[derive(Debug, Clone)]
pub struct Solution {
    pub domains: Domains,
}

impl Solution {
    /// The root state: every variable starts at its declared domain.
    pub fn initial(csp: &Csp) -> Self {
        let domains = csp
            .variable_ids()
            .map(|id| (id, csp.variable(id).domain().iter().copied().collect()))
            .collect();
        Self { domains }
    }

    /// Checks if every variable's domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(|domain| domain.len() == 1)
    }

    pub fn domain(&self, var: VariableId) -> &Domain {
        self.domains.get(&var).unwrap()
    }

    /// The assigned value of `var`, if its domain has narrowed to one value.
    pub fn value_of(&self, var: VariableId) -> Option<i64> {
        let domain = self.domains.get(&var)?;
        if domain.len() == 1 {
            domain.get_min().copied()
        } else {
            None
        }
    }

    /// A new state with `var` assigned to `value`.
    pub fn assign(&self, var: VariableId, value: i64) -> Self {
        self.with_domain(var, OrdSet::unit(value))
    }

    /// A new state with `var`'s domain replaced by `domain`.
    pub fn with_domain(&self, var: VariableId, domain: Domain) -> Self {
        Self {
            domains: self.domains.update(var, domain),
        }
    }
}

//! Heuristics for the order in which a variable's values are tried.

use crate::solver::solution::Domain;

/// A value-ordering heuristic: given the domain of the variable being
/// branched on, returns its values in the order they should be attempted.
pub trait ValueOrderingHeuristic {
    fn order_values(&self, domain: &Domain) -> Vec<i64>;
}

/// Tries values in ascending order, the domain's natural iteration order.
pub struct IdentityValueHeuristic;

impl ValueOrderingHeuristic for IdentityValueHeuristic {
    fn order_values(&self, domain: &Domain) -> Vec<i64> {
        domain.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use im::ordset;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn identity_order_is_ascending() {
        let domain = ordset![3, 1, 2];
        assert_eq!(IdentityValueHeuristic.order_values(&domain), vec![1, 2, 3]);
    }
}

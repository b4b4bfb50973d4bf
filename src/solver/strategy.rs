use tracing::debug;

use crate::{
    csp::Csp,
    error::Result,
    solver::{
        heuristics::{
            restart::RestartPolicy,
            value::{IdentityValueHeuristic, ValueOrderingHeuristic},
            variable::{MinimumRemainingValuesHeuristic, VariableSelectionHeuristic},
        },
        propagate::Propagator,
        solution::Solution,
        stats::SearchStats,
    },
};

/// Whether a complete assignment satisfies every constraint of the CSP.
fn satisfies_all(csp: &Csp, solution: &Solution) -> bool {
    csp.constraints().iter().all(|constraint| {
        let tuple: Option<Vec<i64>> = constraint
            .scope()
            .iter()
            .map(|&var| solution.value_of(var))
            .collect();
        tuple.is_some_and(|tuple| constraint.is_satisfied_by(&tuple))
    })
}

/// A complete search procedure over one CSP instance.
pub trait SearchStrategy {
    /// Runs the search to completion.
    ///
    /// Returns `(Some(solution), stats)` when a complete assignment exists,
    /// `(None, stats)` when the instance is proven unsatisfiable.
    fn solve(&self, csp: &Csp, initial_solution: Solution) -> Result<(Option<Solution>, SearchStats)>;
}

/// Depth-first backtracking search with propagation after every assignment.
///
/// The propagator runs once on the root state before any branching, so
/// instances decided by propagation alone never enter the search loop.
pub struct BacktrackingSearch {
    propagator: Box<dyn Propagator>,
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
}

impl BacktrackingSearch {
    pub fn new(
        propagator: Box<dyn Propagator>,
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self {
            propagator,
            variable_heuristic,
            value_heuristic,
        }
    }

    /// Minimum-remaining-values branching with ascending value order.
    pub fn with_defaults(propagator: Box<dyn Propagator>) -> Self {
        Self::new(
            propagator,
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(IdentityValueHeuristic),
        )
    }

    fn search(
        &self,
        csp: &Csp,
        solution: Solution,
        mut stats: SearchStats,
    ) -> Result<(Option<Solution>, SearchStats)> {
        stats.nodes_visited += 1;

        if solution.is_complete() {
            // Propagation may narrow two variables to singletons in one pass
            // without ever rechecking a constraint that joins them, so a
            // complete state still needs a full verification.
            if satisfies_all(csp, &solution) {
                return Ok((Some(solution), stats));
            }
            return Ok((None, stats));
        }

        let Some(var_to_branch) = self.variable_heuristic.select_variable(&solution) else {
            return Ok((Some(solution), stats));
        };

        let domain = solution.domain(var_to_branch).clone();

        for value in self.value_heuristic.order_values(&domain) {
            let guess_solution = solution.assign(var_to_branch, value);

            if let Some(propagated_solution) =
                self.propagator
                    .propagate(csp, guess_solution, Some(var_to_branch), &mut stats)?
            {
                let (found_solution, new_stats) = self.search(csp, propagated_solution, stats)?;
                stats = new_stats;
                if found_solution.is_some() {
                    return Ok((found_solution, stats));
                }
            }
            stats.backtracks += 1;
        }

        Ok((None, stats))
    }
}

impl SearchStrategy for BacktrackingSearch {
    fn solve(&self, csp: &Csp, initial_solution: Solution) -> Result<(Option<Solution>, SearchStats)> {
        let mut stats = SearchStats::default();
        let Some(root_solution) =
            self.propagator
                .propagate(csp, initial_solution, None, &mut stats)?
        else {
            return Ok((None, stats));
        };
        if root_solution.is_complete() {
            debug!("root propagation decided the instance");
            if satisfies_all(csp, &root_solution) {
                return Ok((Some(root_solution), stats));
            }
            return Ok((None, stats));
        }

        self.search(csp, root_solution, stats)
    }
}

/// Re-runs an inner strategy while its restart policy asks for another
/// attempt, accumulating statistics across attempts.
pub struct RestartingSearch {
    inner_strategy: Box<dyn SearchStrategy>,
    restart_policy: Box<dyn RestartPolicy>,
}

impl RestartingSearch {
    pub fn new(
        inner_strategy: Box<dyn SearchStrategy>,
        restart_policy: Box<dyn RestartPolicy>,
    ) -> Self {
        Self {
            inner_strategy,
            restart_policy,
        }
    }
}

impl SearchStrategy for RestartingSearch {
    fn solve(&self, csp: &Csp, initial_solution: Solution) -> Result<(Option<Solution>, SearchStats)> {
        let mut cumulative_stats = SearchStats::default();
        let mut attempt = 0;

        loop {
            let (solution, attempt_stats) =
                self.inner_strategy.solve(csp, initial_solution.clone())?;
            cumulative_stats.merge(&attempt_stats);

            if solution.is_some() || !self.restart_policy.should_restart(attempt, &attempt_stats) {
                return Ok((solution, cumulative_stats));
            }
            debug!(attempt, "restarting search");
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        csp::{Constraint, Variable},
        solver::{
            heuristics::{restart::BacktrackLimitRestart, variable::RandomVariableHeuristic},
            propagate::{ArcConsistency, AssignmentChecking, ForwardChecking},
        },
    };

    /// ?A != ?B with ?A in {1, 2} and ?B fixed to 1: the solver must deduce
    /// ?A = 2.
    fn not_equal_csp() -> Csp {
        let mut csp = Csp::new("test");
        let a = csp.add_variable(Variable::new("a", vec![1, 2]));
        let b = csp.add_variable(Variable::new("b", vec![1]));
        let con = Constraint::new("ne", vec![a, b])
            .with_satisfying_tuples([vec![1, 2], vec![2, 1]]);
        csp.add_constraint(con).unwrap();
        csp
    }

    #[test]
    fn propagation_alone_can_decide_an_instance() {
        let _ = tracing_subscriber::fmt::try_init();
        let csp = not_equal_csp();
        let solver = BacktrackingSearch::with_defaults(Box::new(ForwardChecking));

        let (solution, stats) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
        let solution = solution.unwrap();

        assert_eq!(solution.value_of(0), Some(2));
        assert_eq!(stats.nodes_visited, 0);
    }

    #[test]
    fn plain_backtracking_finds_the_same_assignment() {
        let csp = not_equal_csp();
        let solver = BacktrackingSearch::with_defaults(Box::new(AssignmentChecking));

        let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
        assert_eq!(solution.unwrap().value_of(0), Some(2));
    }

    #[test]
    fn an_empty_constraint_makes_the_instance_unsatisfiable() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable(Variable::new("a", vec![1, 2]));
        let b = csp.add_variable(Variable::new("b", vec![1, 2]));
        csp.add_constraint(Constraint::new("never", vec![a, b]))
            .unwrap();

        for propagator in [
            Box::new(AssignmentChecking) as Box<dyn Propagator>,
            Box::new(ForwardChecking),
            Box::new(ArcConsistency),
        ] {
            let solver = BacktrackingSearch::with_defaults(propagator);
            let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
            assert!(solution.is_none());
        }
    }

    #[test]
    fn restarting_with_no_restart_policy_runs_exactly_once() {
        use crate::solver::heuristics::restart::NoRestartPolicy;

        let csp = not_equal_csp();
        let inner = BacktrackingSearch::with_defaults(Box::new(ForwardChecking));
        let solver = RestartingSearch::new(Box::new(inner), Box::new(NoRestartPolicy));

        let (solution, stats) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
        assert_eq!(solution.unwrap().value_of(0), Some(2));
        assert_eq!(stats.nodes_visited, 0);
    }

    #[test]
    fn restarting_search_solves_with_a_random_heuristic() {
        let csp = not_equal_csp();
        let inner = BacktrackingSearch::new(
            Box::new(ForwardChecking),
            Box::new(RandomVariableHeuristic::seeded(42)),
            Box::new(IdentityValueHeuristic),
        );
        let solver = RestartingSearch::new(
            Box::new(inner),
            Box::new(BacktrackLimitRestart {
                max_backtracks: 100,
                max_attempts: 3,
            }),
        );

        let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
        assert_eq!(solution.unwrap().value_of(0), Some(2));
    }
}

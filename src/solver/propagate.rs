//! Propagation strategies run after every assignment (and once before
//! search starts) to prune values that can no longer appear in any solution.
//!
//! All three propagators are built on the same extensional primitive,
//! [`crate::csp::Constraint::has_support`]; they differ only in how much of
//! the constraint graph they are willing to re-check.

use std::{collections::HashMap, time::Instant};

use tracing::trace;

use crate::{
    csp::{ConstraintId, Csp, VariableId},
    error::Result,
    solver::{
        solution::{Domain, Solution},
        stats::SearchStats,
        work_list::PruneQueue,
    },
};

/// A domain-pruning strategy.
///
/// `trigger` is the variable just assigned by the search, or `None` for the
/// root call before any branching. Returns `Ok(None)` when a domain wipes
/// out, signalling the caller to backtrack.
pub trait Propagator {
    fn propagate(
        &self,
        csp: &Csp,
        solution: Solution,
        trigger: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Option<Solution>>;
}

fn constraints_on(csp: &Csp) -> HashMap<VariableId, Vec<ConstraintId>> {
    let mut map: HashMap<VariableId, Vec<ConstraintId>> = HashMap::new();
    for (id, constraint) in csp.constraints().iter().enumerate() {
        for &var in constraint.scope() {
            map.entry(var).or_default().push(id);
        }
    }
    map
}

/// Prunes nothing: a state is rejected only when some fully assigned
/// constraint's tuple is missing from its satisfying set. This is plain
/// chronological backtracking.
#[derive(Debug, Default)]
pub struct AssignmentChecking;

impl Propagator for AssignmentChecking {
    fn propagate(
        &self,
        csp: &Csp,
        solution: Solution,
        trigger: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Option<Solution>> {
        for (constraint_id, constraint) in csp.constraints().iter().enumerate() {
            if let Some(trigger) = trigger {
                if !constraint.scope().contains(&trigger) {
                    continue;
                }
            }

            let mut tuple = Vec::with_capacity(constraint.arity());
            for &var in constraint.scope() {
                match solution.value_of(var) {
                    Some(value) => tuple.push(value),
                    None => break,
                }
            }
            if tuple.len() < constraint.arity() {
                continue;
            }

            let entry = stats.constraint_stats.entry(constraint_id).or_default();
            entry.checks += 1;
            let start_time = Instant::now();
            let satisfied = constraint.is_satisfied_by(&tuple);
            entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
            if !satisfied {
                trace!(constraint = constraint.name(), "assignment violates tuples");
                return Ok(None);
            }
        }
        Ok(Some(solution))
    }
}

/// Forward checking: every constraint with at most one unassigned scope
/// variable is enforced. The unassigned variable loses the values with no
/// supporting tuple; a fully assigned constraint is checked exactly.
#[derive(Debug, Default)]
pub struct ForwardChecking;

impl Propagator for ForwardChecking {
    fn propagate(
        &self,
        csp: &Csp,
        mut solution: Solution,
        trigger: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Option<Solution>> {
        for (constraint_id, constraint) in csp.constraints().iter().enumerate() {
            if let Some(trigger) = trigger {
                if !constraint.scope().contains(&trigger) {
                    continue;
                }
            }

            let mut unassigned = None;
            let mut more_than_one = false;
            for (position, &var) in constraint.scope().iter().enumerate() {
                if solution.domain(var).len() > 1 {
                    if unassigned.is_some() {
                        more_than_one = true;
                        break;
                    }
                    unassigned = Some((position, var));
                }
            }
            if more_than_one {
                continue;
            }

            let entry = stats.constraint_stats.entry(constraint_id).or_default();
            entry.checks += 1;
            let start_time = Instant::now();

            let Some((position, var)) = unassigned else {
                // Fully assigned: check the tuple exactly.
                let tuple: Vec<i64> = constraint
                    .scope()
                    .iter()
                    .map(|&v| solution.value_of(v).unwrap())
                    .collect();
                let satisfied = constraint.is_satisfied_by(&tuple);
                entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
                if !satisfied {
                    return Ok(None);
                }
                continue;
            };

            let current = solution.domain(var).clone();
            let kept: Domain = current
                .iter()
                .filter(|&&value| {
                    constraint.has_support(position, value, |other, v| {
                        solution.domain(other).contains(&v)
                    })
                })
                .copied()
                .collect();

            if kept.len() < current.len() {
                entry.prunings += (current.len() - kept.len()) as u64;
                if kept.is_empty() {
                    entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
                    trace!(constraint = constraint.name(), "domain wipeout");
                    return Ok(None);
                }
                solution = solution.with_domain(var, kept);
            }
            entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
        }
        Ok(Some(solution))
    }
}

/// Generalized arc consistency: a worklist of constraints is re-checked to
/// fixpoint, pruning every value of every scope variable that lacks a
/// supporting tuple. Strictly stronger pruning than [`ForwardChecking`], at
/// the cost of scanning tuple sets far more often.
#[derive(Debug, Default)]
pub struct ArcConsistency;

impl Propagator for ArcConsistency {
    fn propagate(
        &self,
        csp: &Csp,
        mut solution: Solution,
        trigger: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Option<Solution>> {
        let constraints_on = constraints_on(csp);

        let mut queue = PruneQueue::new();
        match trigger {
            None => {
                for constraint_id in 0..csp.constraints().len() {
                    queue.push_back(constraint_id);
                }
            }
            Some(var) => {
                for &constraint_id in constraints_on.get(&var).into_iter().flatten() {
                    queue.push_back(constraint_id);
                }
            }
        }

        while let Some(constraint_id) = queue.pop_front() {
            let constraint = csp.constraint(constraint_id);
            let entry = stats.constraint_stats.entry(constraint_id).or_default();
            entry.checks += 1;
            let start_time = Instant::now();

            for (position, &var) in constraint.scope().iter().enumerate() {
                let current = solution.domain(var).clone();
                let kept: Domain = current
                    .iter()
                    .filter(|&&value| {
                        constraint.has_support(position, value, |other, v| {
                            solution.domain(other).contains(&v)
                        })
                    })
                    .copied()
                    .collect();

                if kept.len() == current.len() {
                    continue;
                }
                entry.prunings += (current.len() - kept.len()) as u64;
                if kept.is_empty() {
                    entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
                    trace!(constraint = constraint.name(), "domain wipeout");
                    return Ok(None);
                }
                solution = solution.with_domain(var, kept);

                // The domain of `var` shrank; every constraint touching it
                // (this one included, for its earlier positions) must be
                // re-checked.
                for &dependent in &constraints_on[&var] {
                    queue.push_back(dependent);
                }
            }
            entry.time_spent_micros += start_time.elapsed().as_micros() as u64;
        }

        Ok(Some(solution))
    }
}

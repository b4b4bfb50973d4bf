use tracing::debug;

use crate::{
    csp::{Constraint, ConstraintId, Variable, VariableId},
    error::ModelError,
};

/// One complete, immutable CSP instance: the variables and constraints of a
/// single puzzle, ready to hand to a search strategy.
///
/// Registration order of variables and constraints carries no semantics; it
/// only influences the tie-breaking of search heuristics.
#[derive(Debug, Clone)]
pub struct Csp {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl Csp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a variable and returns its id.
    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        let id = self.variables.len() as VariableId;
        self.variables.push(variable);
        id
    }

    /// Registers a constraint, validating that every scope variable exists
    /// and that every satisfying tuple matches the scope's arity.
    ///
    /// Tuple components are deliberately *not* checked against declared
    /// domains: the n-ary model attaches full permutation tuples regardless
    /// of fixed cells, and components outside a current domain simply never
    /// find support during search.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        for &var in constraint.scope() {
            if var as usize >= self.variables.len() {
                return Err(ModelError::UnknownVariable {
                    constraint: constraint.name().to_owned(),
                    variable: var,
                });
            }
        }
        let arity = constraint.arity();
        for tuple in constraint.satisfying_tuples() {
            if tuple.len() != arity {
                return Err(ModelError::TupleArity {
                    constraint: constraint.name().to_owned(),
                    got: tuple.len(),
                    expected: arity,
                });
            }
        }

        debug!(
            name = constraint.name(),
            arity,
            tuples = constraint.num_satisfying_tuples(),
            "registered constraint"
        );
        let id = self.constraints.len();
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id as usize]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> {
        0..self.variables.len() as VariableId
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// Identifies a variable within one [`crate::csp::Csp`].
///
/// Ids are handed out sequentially by [`crate::csp::Csp::add_variable`] and
/// index into the problem's variable table.
pub type VariableId = u32;

/// One decision variable: a debug name and its declared domain.
///
/// The declared domain is an ordered sequence of integers and never changes
/// after construction. A singleton domain models a pre-filled cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    domain: Vec<i64>,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    /// The name is only used for debugging and traceability.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared domain, in ascending construction order.
    pub fn domain(&self) -> &[i64] {
        &self.domain
    }

    /// A variable with a single-value domain is fixed for the whole search.
    pub fn is_fixed(&self) -> bool {
        self.domain.len() == 1
    }
}

use std::backtrace::Backtrace;

use crate::csp::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Structural problems in a raw board, reported by [`crate::board::Board::parse`].
///
/// A malformed board aborts model construction entirely; no partial CSP
/// instance is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedBoardError {
    #[error("board has no rows")]
    EmptyBoard,
    #[error("row {row} has {len} slots, expected {expected}")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) is fixed to {value}, outside 1..={n}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: i64,
        n: usize,
    },
    #[error("row {row}, slot {slot}: expected a cell value, found an inequality marker")]
    ExpectedCell { row: usize, slot: usize },
    #[error("row {row}, slot {slot}: expected an inequality marker, found a cell value")]
    ExpectedMarker { row: usize, slot: usize },
}

/// Violations of the CSP registration contracts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("constraint `{constraint}` references unknown variable ?{variable}")]
    UnknownVariable {
        constraint: String,
        variable: VariableId,
    },
    #[error(
        "constraint `{constraint}` holds a tuple of arity {got}, but its scope has arity {expected}"
    )]
    TupleArity {
        constraint: String,
        got: usize,
        expected: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Board: {inner}\n{backtrace}")]
    Board {
        inner: Box<MalformedBoardError>,
        backtrace: Box<Backtrace>,
    },
    #[error("Model: {inner}\n{backtrace}")]
    Model {
        inner: Box<ModelError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<MalformedBoardError> for Error {
    fn from(inner: MalformedBoardError) -> Self {
        Error::Board {
            inner: Box::new(inner),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

impl From<ModelError> for Error {
    fn from(inner: ModelError) -> Self {
        Error::Model {
            inner: Box::new(inner),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

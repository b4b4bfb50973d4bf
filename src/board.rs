//! The raw Futoshiki board format and its parser.
//!
//! A board of side `n` is a sequence of `n` rows, each of length `2n - 1`.
//! Even-indexed slots hold cell values (`0` for an empty cell, `1..=n` for a
//! pre-filled one); odd-indexed slots hold the inequality marker between the
//! two neighbouring cells. The 3×3 puzzle
//!
//! ```text
//! -------
//! | > |2|
//! | | | |
//! | | < |
//! -------
//! ```
//!
//! is written as `[[0,">",0,".",2],[0,".",0,".",0],[0,".",0,"<",0]]`.
//!
//! Markers only ever sit between horizontally adjacent cells; the format has
//! no vertical markers.

use serde::{Deserialize, Serialize};

use crate::error::MalformedBoardError;

/// The marker between two horizontally adjacent cells in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// `"<"`: the left cell must be strictly smaller than the right cell.
    #[serde(rename = "<")]
    Less,
    /// `">"`: the left cell must be strictly greater than the right cell.
    #[serde(rename = ">")]
    Greater,
    /// `"."`: the pair is unconstrained.
    #[serde(rename = ".")]
    None,
}

impl Marker {
    /// The strict ordering this marker demands, if any.
    pub fn ordering(self) -> Option<Ordering> {
        match self {
            Marker::Less => Some(Ordering::Less),
            Marker::Greater => Some(Ordering::Greater),
            Marker::None => None,
        }
    }
}

/// The direction of a strict inequality between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    /// Left cell < right cell.
    Less,
    /// Left cell > right cell.
    Greater,
}

impl Ordering {
    /// Whether the pair `(left, right)` satisfies this ordering.
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            Ordering::Less => left < right,
            Ordering::Greater => left > right,
        }
    }
}

/// One slot of a raw board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    /// A cell value: `0` for empty, `1..=n` for a pre-filled cell.
    Cell(i64),
    /// An inequality marker between the neighbouring cells.
    Marker(Marker),
}

/// A strict ordering between cell `(row, left)` and cell `(row, left + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inequality {
    pub row: usize,
    /// Column of the left cell; the right cell is at `left + 1`.
    pub left: usize,
    pub ordering: Ordering,
}

/// A structurally validated board: an `n`×`n` grid of cell values plus the
/// inequality annotations between horizontally adjacent cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    n: usize,
    cells: Vec<Vec<i64>>,
    inequalities: Vec<Inequality>,
}

impl Board {
    /// Parses and validates a raw board.
    ///
    /// Every row must have exactly `2n - 1` slots, every even-indexed slot
    /// must be a cell value in `0..=n`, and every odd-indexed slot must be a
    /// marker. `Marker::None` slots produce no stored [`Inequality`].
    pub fn parse(rows: &[Vec<Slot>]) -> Result<Self, MalformedBoardError> {
        let n = rows.len();
        if n == 0 {
            return Err(MalformedBoardError::EmptyBoard);
        }
        let expected = 2 * n - 1;

        let mut cells = Vec::with_capacity(n);
        let mut inequalities = Vec::new();
        for (row, slots) in rows.iter().enumerate() {
            if slots.len() != expected {
                return Err(MalformedBoardError::RowLength {
                    row,
                    len: slots.len(),
                    expected,
                });
            }

            let mut row_cells = Vec::with_capacity(n);
            for (slot, &content) in slots.iter().enumerate() {
                if slot % 2 == 0 {
                    let Slot::Cell(value) = content else {
                        return Err(MalformedBoardError::ExpectedCell { row, slot });
                    };
                    if value != 0 && !(1..=n as i64).contains(&value) {
                        return Err(MalformedBoardError::ValueOutOfRange {
                            row,
                            col: slot / 2,
                            value,
                            n,
                        });
                    }
                    row_cells.push(value);
                } else {
                    let Slot::Marker(marker) = content else {
                        return Err(MalformedBoardError::ExpectedMarker { row, slot });
                    };
                    if let Some(ordering) = marker.ordering() {
                        inequalities.push(Inequality {
                            row,
                            left: slot / 2,
                            ordering,
                        });
                    }
                }
            }
            cells.push(row_cells);
        }

        Ok(Self {
            n,
            cells,
            inequalities,
        })
    }

    /// The side length of the board.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The value of the cell at `(row, col)`: `0` if it was empty on input.
    pub fn cell(&self, row: usize, col: usize) -> i64 {
        self.cells[row][col]
    }

    /// The inequality annotations, in row-major order of their left cell.
    pub fn inequalities(&self) -> &[Inequality] {
        &self.inequalities
    }
}

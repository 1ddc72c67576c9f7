//! Grid coordinates and movement directions.
//!
//! Cells are addressed by signed `(row, col)` pairs so that shifting off the
//! edge of a track produces a representable (out-of-bounds) cell instead of
//! wrapping. Bounds are checked by the `Track`, never here.

use serde::{Deserialize, Serialize};

/// Compass directions a vehicle can move in.
///
/// Races always progress east, so there are no westward directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// One row up.
    N,
    /// One row down.
    S,
    /// One column forward.
    E,
    /// One row up and one column forward.
    NE,
    /// One row down and one column forward.
    SE,
}

impl Direction {
    /// Row and column offsets for this direction.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (-1, 0),
            Direction::S => (1, 0),
            Direction::E => (0, 1),
            Direction::NE => (-1, 1),
            Direction::SE => (1, 1),
        }
    }
}

/// A single cell on the race grid.
///
/// Value type: two cells are equal iff their coordinates are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    /// Create a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in the given direction.
    #[inline]
    #[must_use]
    pub const fn shifted(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The cell `steps` columns further east.
    #[inline]
    #[must_use]
    pub const fn east(self, steps: i32) -> Self {
        Self {
            row: self.row,
            col: self.col + steps,
        }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

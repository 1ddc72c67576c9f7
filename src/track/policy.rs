//! Opponent movement policy.
//!
//! Opponents do not plan: at each cell they pick an action from a fixed
//! distribution supplied with the track. Cells without an entry make the
//! opponent stay where it is.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::error::TrackError;
use super::validate_probability;
use crate::core::{Action, GridCell};
use crate::sim::PROBABILITY_TOLERANCE;

/// Per-cell action distribution followed by every opponent on a track.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovementPolicy {
    table: FxHashMap<GridCell, SmallVec<[(Action, f64); 6]>>,
}

impl MovementPolicy {
    /// Create an empty policy (every opponent stays put).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action distribution at `cell`.
    ///
    /// Every probability must lie in `[0, 1]` and the total must be 1
    /// within tolerance; a malformed table is rejected, never normalized.
    pub fn set(&mut self, cell: GridCell, entries: &[(Action, f64)]) -> Result<(), TrackError> {
        for (action, p) in entries {
            validate_probability(action.code(), *p)?;
        }
        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(TrackError::PolicyNotNormalized { cell, total });
        }
        self.table.insert(cell, SmallVec::from_slice(entries));
        Ok(())
    }

    /// Builder form of [`MovementPolicy::set`].
    pub fn with(mut self, cell: GridCell, entries: &[(Action, f64)]) -> Result<Self, TrackError> {
        self.set(cell, entries)?;
        Ok(self)
    }

    /// Action distribution at `cell`; empty if none was defined.
    #[must_use]
    pub fn actions_at(&self, cell: GridCell) -> &[(Action, f64)] {
        self.table.get(&cell).map_or(&[], |entries| entries.as_slice())
    }

    /// First cell with an entry that lies outside a `rows` x `cols` grid.
    pub(crate) fn cells_outside(&self, rows: usize, cols: usize) -> Option<GridCell> {
        self.table
            .keys()
            .copied()
            .find(|c| c.row < 0 || c.col < 0 || c.row as usize >= rows || c.col as usize >= cols)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

//! Dense per-cell hazard probabilities.
//!
//! Built once per track at the start of a planning session and then only
//! read, by every node expansion and rollout of that session's trees.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::Track;
use crate::core::GridCell;

/// Probability that a distractor is present on each cell of a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardMatrix {
    rows: usize,
    cols: usize,
    /// Row-major probabilities.
    probabilities: Vec<f64>,
}

impl HazardMatrix {
    /// Build the matrix from a track's distractors.
    ///
    /// Several distractors on one cell combine into the probability that at
    /// least one of them appears.
    #[must_use]
    pub fn build(track: &Track) -> Self {
        let mut matrix = Self::empty(track.rows(), track.cols());
        for distractor in track.distractors() {
            if let Some(idx) = track.index(distractor.position) {
                let absent = (1.0 - matrix.probabilities[idx]) * (1.0 - distractor.appear_probability());
                matrix.probabilities[idx] = 1.0 - absent;
            }
        }
        debug!(
            track = track.name(),
            hazardous_cells = matrix.hazardous_cells(),
            "built hazard matrix"
        );
        matrix
    }

    /// A hazard-free matrix of the given size.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            probabilities: vec![0.0; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Hazard probability at `cell`; zero outside the grid.
    #[inline]
    #[must_use]
    pub fn probability(&self, cell: GridCell) -> f64 {
        if cell.row < 0 || cell.col < 0 {
            return 0.0;
        }
        let (row, col) = (cell.row as usize, cell.col as usize);
        if row >= self.rows || col >= self.cols {
            return 0.0;
        }
        self.probabilities[row * self.cols + col]
    }

    /// True if a distractor can appear on `cell`.
    #[inline]
    #[must_use]
    pub fn is_hazardous(&self, cell: GridCell) -> bool {
        self.probability(cell) > 0.0
    }

    /// Number of cells with a non-zero hazard probability.
    #[must_use]
    pub fn hazardous_cells(&self) -> usize {
        self.probabilities.iter().filter(|&&p| p > 0.0).count()
    }
}

//! Errors raised while describing a track.

use thiserror::Error;

use crate::core::GridCell;

/// Errors that can occur while building a track or its components.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackError {
    #[error("Track must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("Cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBounds { cell: GridCell, rows: usize, cols: usize },

    #[error("Probability {probability} for '{what}' is not in [0, 1]")]
    InvalidProbability { what: String, probability: f64 },

    #[error("Movement policy at {cell} sums to {total}, expected 1")]
    PolicyNotNormalized { cell: GridCell, total: f64 },
}

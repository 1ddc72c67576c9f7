//! Track grid and its builder.
//!
//! The track is the read-only oracle every other component queries: cell
//! classification, bounds, prize, distractors and the opponent policy.
//! Cells outside the grid are never an error at query time; they simply
//! are not `Empty`, `Obstacle` or `Goal`.

use serde::{Deserialize, Serialize};

use super::distractor::Distractor;
use super::error::TrackError;
use super::policy::MovementPolicy;
use crate::core::GridCell;

/// Classification of a single track cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty,
    Obstacle,
    Goal,
}

/// A rectangular race track.
#[derive(Clone, Debug)]
pub struct Track {
    name: String,
    rows: usize,
    cols: usize,
    /// Row-major cell classifications.
    cells: Vec<CellType>,
    prize: f64,
    distractors: Vec<Distractor>,
    start_positions: Vec<GridCell>,
    opponent_policy: MovementPolicy,
}

impl Track {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Monetary payoff for reaching a goal cell.
    #[inline]
    #[must_use]
    pub fn prize(&self) -> f64 {
        self.prize
    }

    #[must_use]
    pub fn distractors(&self) -> &[Distractor] {
        &self.distractors
    }

    #[must_use]
    pub fn start_positions(&self) -> &[GridCell] {
        &self.start_positions
    }

    #[must_use]
    pub fn opponent_policy(&self) -> &MovementPolicy {
        &self.opponent_policy
    }

    /// Check whether a cell lies inside the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    #[inline]
    pub(crate) fn index(&self, cell: GridCell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Classification of a cell, `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn cell_type(&self, cell: GridCell) -> Option<CellType> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// True if `cell` is an in-bounds obstacle.
    #[inline]
    #[must_use]
    pub fn is_obstacle(&self, cell: GridCell) -> bool {
        self.cell_type(cell) == Some(CellType::Obstacle)
    }

    /// True if `cell` is an in-bounds goal.
    #[inline]
    #[must_use]
    pub fn is_goal(&self, cell: GridCell) -> bool {
        self.cell_type(cell) == Some(CellType::Goal)
    }

    /// True if a vehicle may occupy `cell`: in bounds, and not an obstacle
    /// unless the vehicle is all-terrain.
    #[inline]
    #[must_use]
    pub fn is_passable(&self, cell: GridCell, all_terrain: bool) -> bool {
        match self.cell_type(cell) {
            None => false,
            Some(CellType::Obstacle) => all_terrain,
            Some(_) => true,
        }
    }
}

/// Builder for creating a [`Track`].
///
/// ```
/// use race_planner::core::GridCell;
/// use race_planner::track::TrackBuilder;
///
/// let track = TrackBuilder::new(3, 6)
///     .prize(500.0)
///     .goal(GridCell::new(1, 5))
///     .obstacle(GridCell::new(1, 3))
///     .start(GridCell::new(1, 0))
///     .build()
///     .unwrap();
///
/// assert!(track.is_goal(GridCell::new(1, 5)));
/// assert!(track.is_obstacle(GridCell::new(1, 3)));
/// ```
#[derive(Clone, Debug)]
pub struct TrackBuilder {
    name: String,
    rows: usize,
    cols: usize,
    prize: f64,
    obstacles: Vec<GridCell>,
    goals: Vec<GridCell>,
    distractors: Vec<Distractor>,
    start_positions: Vec<GridCell>,
    opponent_policy: MovementPolicy,
}

impl TrackBuilder {
    /// Start an all-empty `rows` x `cols` track.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            name: String::from("track"),
            rows,
            cols,
            prize: 0.0,
            obstacles: Vec::new(),
            goals: Vec::new(),
            distractors: Vec::new(),
            start_positions: Vec::new(),
            opponent_policy: MovementPolicy::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn prize(mut self, prize: f64) -> Self {
        self.prize = prize;
        self
    }

    pub fn obstacle(mut self, cell: GridCell) -> Self {
        self.obstacles.push(cell);
        self
    }

    pub fn obstacles(mut self, cells: impl IntoIterator<Item = GridCell>) -> Self {
        self.obstacles.extend(cells);
        self
    }

    pub fn goal(mut self, cell: GridCell) -> Self {
        self.goals.push(cell);
        self
    }

    /// Mark every cell of column `col` as a goal.
    pub fn goal_column(mut self, col: i32) -> Self {
        self.goals
            .extend((0..self.rows as i32).map(|row| GridCell::new(row, col)));
        self
    }

    pub fn distractor(mut self, distractor: Distractor) -> Self {
        self.distractors.push(distractor);
        self
    }

    pub fn start(mut self, cell: GridCell) -> Self {
        self.start_positions.push(cell);
        self
    }

    pub fn opponent_policy(mut self, policy: MovementPolicy) -> Self {
        self.opponent_policy = policy;
        self
    }

    /// Build the track, checking that every referenced cell is on the grid.
    pub fn build(self) -> Result<Track, TrackError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(TrackError::EmptyGrid { rows, cols });
        }

        let mut track = Track {
            name: self.name,
            rows,
            cols,
            cells: vec![CellType::Empty; rows * cols],
            prize: self.prize,
            distractors: Vec::new(),
            start_positions: Vec::new(),
            opponent_policy: MovementPolicy::new(),
        };

        let out_of_bounds = |cell: GridCell| TrackError::OutOfBounds { cell, rows, cols };

        for cell in self.obstacles {
            let idx = track.index(cell).ok_or_else(|| out_of_bounds(cell))?;
            track.cells[idx] = CellType::Obstacle;
        }
        for cell in self.goals {
            let idx = track.index(cell).ok_or_else(|| out_of_bounds(cell))?;
            track.cells[idx] = CellType::Goal;
        }
        for distractor in &self.distractors {
            if !track.in_bounds(distractor.position) {
                return Err(out_of_bounds(distractor.position));
            }
        }
        for &cell in &self.start_positions {
            if !track.in_bounds(cell) {
                return Err(out_of_bounds(cell));
            }
        }
        if let Some(cell) = self.opponent_policy.cells_outside(rows, cols) {
            return Err(out_of_bounds(cell));
        }

        track.distractors = self.distractors;
        track.start_positions = self.start_positions;
        track.opponent_policy = self.opponent_policy;
        Ok(track)
    }
}

//! # race-planner
//!
//! Online Monte Carlo tree search for a vehicle racing east across a grid
//! of obstacles and randomly appearing distractors.
//!
//! ## Design Principles
//!
//! 1. **Plan per turn**: a fresh search tree is grown from the vehicle's
//!    actual cell every turn and thrown away afterwards.
//!
//! 2. **Shared read-only track data**: the track and its hazard matrix are
//!    built once and borrowed by every node of a search.
//!
//! 3. **Reproducible randomness**: every random draw goes through an
//!    injected, seeded `RaceRng`.
//!
//! ## Modules
//!
//! - `core`: grid cells, directions, actions, RNG
//! - `track`: track layout, vehicles, distractors, opponent policy, hazard matrix
//! - `sim`: movement rules, race state and the stochastic transition model
//! - `mcts`: search tree, UCT selection, greedy rollouts, planner and race driver

pub mod core;
pub mod mcts;
pub mod sim;
pub mod track;

// Re-export commonly used types
pub use crate::core::{Action, Direction, GridCell, RaceRng};

pub use crate::track::{
    CellType, Distractor, HazardMatrix, MovementPolicy, Speed, Track, TrackBuilder, TrackError,
    Vehicle,
};

pub use crate::sim::{
    DamageCosts, Distribution, Opponent, Player, RaceState, RaceStatus, TransitionError,
    TransitionModel,
};

pub use crate::mcts::{
    GreedyRollout, PlanError, Planner, PlannerConfig, RaceDriver, RaceError, RaceOutcome,
    SearchBudget, SearchStats, SearchTree, TreeStats, Uct, VehicleVariant,
};

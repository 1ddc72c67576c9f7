//! Monte Carlo Tree Search for race planning.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a flat vector addressed by `NodeId`; each
//!   node is one cell reached by the planned vehicle
//! - **UCT selection**: unvisited actions are tried once before the
//!   confidence bound is used; means are scored in units of the prize
//! - **Greedy rollouts**: new nodes are valued by a short look-ahead drive
//! - **Fresh tree per turn**: nothing carries over between turns
//!
//! ## Usage
//!
//! ```rust
//! use race_planner::core::GridCell;
//! use race_planner::mcts::{Planner, PlannerConfig, SearchBudget};
//! use race_planner::track::{HazardMatrix, Speed, TrackBuilder, Vehicle};
//!
//! let track = TrackBuilder::new(3, 4)
//!     .prize(100.0)
//!     .goal(GridCell::new(1, 3))
//!     .build()
//!     .unwrap();
//! let hazards = HazardMatrix::build(&track);
//! let vehicle = Vehicle::new("bike", Speed::Fast);
//!
//! let mut planner =
//!     Planner::new(GridCell::new(1, 0), &vehicle, &track, &hazards, PlannerConfig::default())
//!         .unwrap();
//! planner.run(SearchBudget::Iterations(500));
//! println!("best: {:?}, value {:.2}", planner.best_action(), planner.root_value());
//! ```

pub mod config;
pub mod driver;
pub mod node;
pub mod policy;
pub mod rollout;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{PlannerConfig, SearchBudget};
pub use driver::{RaceDriver, RaceError, RaceOutcome, TurnPlan};
pub use node::{Edge, NodeId, NodeState, SearchNode};
pub use policy::{PlanningEnv, SelectionPolicy, SimulationPolicy, Uct};
pub use rollout::{GreedyRollout, VehicleVariant};
pub use search::{PlanError, Planner};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};

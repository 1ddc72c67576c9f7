//! Race simulation: movement rules, damage, race state and the stochastic
//! transition model.

pub mod costs;
pub mod distribution;
pub mod error;
pub mod moves;
pub mod state;
pub mod transition;

pub use costs::DamageCosts;
pub use distribution::{Distribution, PROBABILITY_TOLERANCE};
pub use error::TransitionError;
pub use moves::Movement;
pub use state::{Opponent, Player, RaceState, RaceStatus};
pub use transition::{TransitionModel, DIAGONAL_PROBABILITY, STEERING_ERROR_PROBABILITY};

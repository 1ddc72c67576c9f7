//! Core types: grid coordinates, actions, RNG.
//!
//! These are shared by the track description, the transition model and the
//! planner, and carry no track-specific knowledge.

pub mod action;
pub mod grid;
pub mod rng;

pub use action::Action;
pub use grid::{Direction, GridCell};
pub use rng::RaceRng;

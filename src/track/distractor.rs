//! Distractors: probabilistic hazards fixed to a cell.
//!
//! A distractor re-rolls whether it has "appeared" every turn, independently
//! of everything else. Only an appeared distractor damages a vehicle that
//! ends its move on the distractor's cell.

use serde::{Deserialize, Serialize};

use super::error::TrackError;
use super::validate_probability;
use crate::core::{GridCell, RaceRng};

/// A hazard at a fixed cell with a per-turn appearance probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distractor {
    pub id: String,
    pub position: GridCell,
    appear_probability: f64,
    /// Whether the distractor is present this turn.
    pub appeared: bool,
}

impl Distractor {
    /// Create a distractor that has not yet appeared.
    ///
    /// Fails if `appear_probability` is not a finite value in `[0, 1]`.
    pub fn new(
        id: impl Into<String>,
        position: GridCell,
        appear_probability: f64,
    ) -> Result<Self, TrackError> {
        let id = id.into();
        validate_probability(&id, appear_probability)?;
        Ok(Self {
            id,
            position,
            appear_probability,
            appeared: false,
        })
    }

    #[inline]
    #[must_use]
    pub fn appear_probability(&self) -> f64 {
        self.appear_probability
    }

    /// Copy of this distractor with the given appearance state.
    #[must_use]
    pub fn with_appeared(&self, appeared: bool) -> Self {
        Self {
            appeared,
            ..self.clone()
        }
    }

    /// Draw next turn's appearance state (a Bernoulli trial).
    #[must_use]
    pub fn resample(&self, rng: &mut RaceRng) -> Self {
        self.with_appeared(rng.gen_bool(self.appear_probability))
    }
}

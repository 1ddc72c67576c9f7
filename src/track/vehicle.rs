//! Vehicle descriptors.
//!
//! A vehicle ("cycle") is fully described by its speed tier and two
//! capability flags. Both the transition model and the planner read these;
//! nothing mutates a vehicle during a race.

use serde::{Deserialize, Serialize};

use crate::core::Action;

/// Speed tier, bounding how far a vehicle can travel forward in one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    /// Maximum forward cells per turn (1, 2 or 3).
    #[must_use]
    pub const fn max_moves(self) -> usize {
        match self {
            Speed::Slow => 1,
            Speed::Medium => 2,
            Speed::Fast => 3,
        }
    }

    /// Fastest forward action this tier can perform.
    #[must_use]
    pub const fn fastest_action(self) -> Action {
        Action::forward(self.max_moves())
    }
}

/// A purchasable racing vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub speed: Speed,
    /// All-terrain vehicles drive through obstacles (taking reduced damage)
    /// instead of being stopped by them.
    pub all_terrain: bool,
    /// Reliable vehicles take less damage from distractors.
    pub reliable: bool,
    pub price: f64,
}

impl Vehicle {
    /// Create a restricted, unreliable vehicle with zero price.
    pub fn new(name: impl Into<String>, speed: Speed) -> Self {
        Self {
            name: name.into(),
            speed,
            all_terrain: false,
            reliable: false,
            price: 0.0,
        }
    }

    /// Mark the vehicle as all-terrain.
    #[must_use]
    pub fn all_terrain(mut self) -> Self {
        self.all_terrain = true;
        self
    }

    /// Mark the vehicle as reliable.
    #[must_use]
    pub fn reliable(mut self) -> Self {
        self.reliable = true;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Downgrade a forward action this vehicle is too slow for.
    ///
    /// Forward actions beyond the speed tier become the fastest forward
    /// action the tier supports. Diagonal actions and `Stay` pass through.
    #[must_use]
    pub fn supported_action(&self, action: Action) -> Action {
        if action.is_forward() {
            Action::forward(action.forward_distance().min(self.speed.max_moves()))
        } else {
            action
        }
    }
}

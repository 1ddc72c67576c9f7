//! Damage costs charged to vehicles.

use serde::{Deserialize, Serialize};

use crate::track::Vehicle;

/// Monetary damage for collisions and distractor hits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageCosts {
    /// Distractor hit on a reliable vehicle.
    pub hazard_reliable: f64,
    /// Distractor hit on an unreliable vehicle.
    pub hazard_unreliable: f64,
    /// Obstacle collision for an all-terrain vehicle.
    pub obstacle_all_terrain: f64,
    /// Obstacle collision for a restricted vehicle.
    pub obstacle_restricted: f64,
}

impl Default for DamageCosts {
    fn default() -> Self {
        Self {
            hazard_reliable: 10.0,
            hazard_unreliable: 75.0,
            obstacle_all_terrain: 5.0,
            obstacle_restricted: 50.0,
        }
    }
}

impl DamageCosts {
    /// Cost of one obstacle collision for `vehicle`.
    #[inline]
    #[must_use]
    pub fn obstacle(&self, vehicle: &Vehicle) -> f64 {
        if vehicle.all_terrain {
            self.obstacle_all_terrain
        } else {
            self.obstacle_restricted
        }
    }

    /// Cost of one distractor hit for `vehicle`.
    #[inline]
    #[must_use]
    pub fn hazard(&self, vehicle: &Vehicle) -> f64 {
        if vehicle.reliable {
            self.hazard_reliable
        } else {
            self.hazard_unreliable
        }
    }
}

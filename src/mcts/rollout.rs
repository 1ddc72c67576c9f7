//! Greedy rollout used to seed new nodes with a value estimate.
//!
//! The rollout looks a few cells ahead, swerves diagonally around threats
//! the vehicle cannot shrug off and otherwise drives flat out. The estimate
//! is biased and noisy; real visits take over once they accumulate.

use super::config::PlannerConfig;
use super::policy::{PlanningEnv, SimulationPolicy};
use crate::core::{Action, GridCell, RaceRng};
use crate::sim::moves::{forward, resolve_candidate, Movement};
use crate::sim::DamageCosts;
use crate::track::Vehicle;

/// Which threats a vehicle can drive through during a rollout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleVariant {
    IgnoresBoth,
    IgnoresObstaclesOnly,
    IgnoresHazardsOnly,
    AvoidsBoth,
}

impl VehicleVariant {
    /// All-terrain vehicles ignore obstacles, reliable ones ignore hazards.
    #[must_use]
    pub fn of(vehicle: &Vehicle) -> Self {
        match (vehicle.all_terrain, vehicle.reliable) {
            (true, true) => VehicleVariant::IgnoresBoth,
            (true, false) => VehicleVariant::IgnoresObstaclesOnly,
            (false, true) => VehicleVariant::IgnoresHazardsOnly,
            (false, false) => VehicleVariant::AvoidsBoth,
        }
    }

    #[must_use]
    pub const fn ignores_obstacles(self) -> bool {
        matches!(self, VehicleVariant::IgnoresBoth | VehicleVariant::IgnoresObstaclesOnly)
    }

    #[must_use]
    pub const fn ignores_hazards(self) -> bool {
        matches!(self, VehicleVariant::IgnoresBoth | VehicleVariant::IgnoresHazardsOnly)
    }
}

/// Greedy look-ahead rollout.
#[derive(Clone, Debug)]
pub struct GreedyRollout {
    look_factor: usize,
    discount: f64,
    step_cost: f64,
    costs: DamageCosts,
}

impl Default for GreedyRollout {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl GreedyRollout {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            look_factor: config.look_factor,
            discount: config.discount,
            step_cost: config.step_cost,
            costs: config.costs.clone(),
        }
    }

    /// Action the rollout takes from `cell`.
    ///
    /// Swerves NE or SE at random when a threat lies within the look-ahead
    /// window, otherwise takes the fastest forward action.
    pub fn choose_action(&self, env: &PlanningEnv<'_>, cell: GridCell, rng: &mut RaceRng) -> Action {
        let variant = VehicleVariant::of(env.vehicle);
        let look_range = self.look_factor * env.vehicle.speed.max_moves();

        let threatened = (1..=look_range as i32)
            .map(|steps| cell.east(steps))
            .take_while(|&c| env.track.in_bounds(c))
            .any(|c| {
                (env.track.is_obstacle(c) && !variant.ignores_obstacles())
                    || (env.hazards.is_hazardous(c) && !variant.ignores_hazards())
            });

        if threatened {
            if rng.coin_flip() {
                Action::NorthEast
            } else {
                Action::SouthEast
            }
        } else {
            env.vehicle.speed.fastest_action()
        }
    }

    /// Reward for standing on `movement.cell` after `movement`.
    ///
    /// Reaching the goal pays the prize less any damage taken on the way.
    fn reward(&self, env: &PlanningEnv<'_>, movement: &Movement, rng: &mut RaceRng) -> f64 {
        let cell = movement.cell;
        if env.track.is_goal(cell) {
            return env.track.prize() - movement.damage;
        }
        if movement.damage > 0.0 || env.track.is_obstacle(cell) {
            return -movement.damage.max(self.costs.obstacle(env.vehicle));
        }
        let p = env.hazards.probability(cell);
        if p > 0.0 && rng.gen_bool(p) {
            return -self.costs.hazard(env.vehicle);
        }
        -self.step_cost
    }
}

impl SimulationPolicy for GreedyRollout {
    fn simulate(&self, env: &PlanningEnv<'_>, start: GridCell, rng: &mut RaceRng) -> f64 {
        let track = env.track;
        let mut total = self.reward(env, &Movement::stay(start), rng);
        if track.is_goal(start) {
            return total;
        }

        let mut cell = start;
        let mut discount = 1.0;
        for _ in 0..2 * track.cols() {
            let action = self.choose_action(env, cell, rng);
            let movement = match action.diagonal() {
                Some(direction) => {
                    resolve_candidate(track, env.vehicle, &self.costs, cell, cell.shifted(direction))
                }
                None => forward(track, env.vehicle, &self.costs, cell, action.forward_distance()),
            };
            cell = movement.cell;
            discount *= self.discount;
            total += discount * self.reward(env, &movement, rng);
            if track.is_goal(cell) {
                break;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{Distractor, HazardMatrix, Speed, Track, TrackBuilder};

    fn corridor() -> Track {
        TrackBuilder::new(3, 4)
            .prize(100.0)
            .goal(GridCell::new(1, 3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_variant_of_vehicle() {
        let base = Vehicle::new("v", Speed::Slow);
        assert_eq!(VehicleVariant::of(&base), VehicleVariant::AvoidsBoth);
        assert_eq!(
            VehicleVariant::of(&base.clone().all_terrain()),
            VehicleVariant::IgnoresObstaclesOnly
        );
        assert_eq!(
            VehicleVariant::of(&base.clone().reliable()),
            VehicleVariant::IgnoresHazardsOnly
        );
        let rugged = base.all_terrain().reliable();
        assert_eq!(VehicleVariant::of(&rugged), VehicleVariant::IgnoresBoth);
        assert!(VehicleVariant::IgnoresBoth.ignores_obstacles());
        assert!(VehicleVariant::IgnoresBoth.ignores_hazards());
        assert!(!VehicleVariant::AvoidsBoth.ignores_hazards());
    }

    #[test]
    fn test_rollout_straight_to_goal() {
        let track = corridor();
        let hazards = HazardMatrix::build(&track);
        let vehicle = Vehicle::new("v", Speed::Fast);
        let env = PlanningEnv { track: &track, vehicle: &vehicle, hazards: &hazards };
        let mut rng = RaceRng::new(1);

        let value = GreedyRollout::default().simulate(&env, GridCell::new(1, 0), &mut rng);
        assert!((value - (100.0 - 0.04)).abs() < 1e-9);
    }

    #[test]
    fn test_rollout_from_goal() {
        let track = corridor();
        let hazards = HazardMatrix::build(&track);
        let vehicle = Vehicle::new("v", Speed::Slow);
        let env = PlanningEnv { track: &track, vehicle: &vehicle, hazards: &hazards };
        let mut rng = RaceRng::new(1);

        let value = GreedyRollout::default().simulate(&env, GridCell::new(1, 3), &mut rng);
        assert_eq!(value, 100.0);
    }

    #[test]
    fn test_rollout_discount() {
        let track = corridor();
        let hazards = HazardMatrix::build(&track);
        let vehicle = Vehicle::new("v", Speed::Slow);
        let env = PlanningEnv { track: &track, vehicle: &vehicle, hazards: &hazards };
        let mut rng = RaceRng::new(1);
        let rollout = GreedyRollout::from_config(&PlannerConfig::default().with_discount(0.5));

        // start, (1,1), (1,2), goal at (1,3)
        let expected = -0.04 - 0.5 * 0.04 - 0.25 * 0.04 + 0.125 * 100.0;
        let value = rollout.simulate(&env, GridCell::new(1, 0), &mut rng);
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_choose_action_swerves_around_obstacle() {
        let track = TrackBuilder::new(3, 6)
            .obstacle(GridCell::new(1, 3))
            .build()
            .unwrap();
        let hazards = HazardMatrix::build(&track);
        let rollout = GreedyRollout::default();
        let mut rng = RaceRng::new(5);

        let restricted = Vehicle::new("r", Speed::Slow);
        let env = PlanningEnv { track: &track, vehicle: &restricted, hazards: &hazards };
        for _ in 0..20 {
            let action = rollout.choose_action(&env, GridCell::new(1, 0), &mut rng);
            assert!(action.is_diagonal());
        }
        // Nothing ahead on the top row
        assert_eq!(rollout.choose_action(&env, GridCell::new(0, 0), &mut rng), Action::ForwardSlow);

        let rugged = Vehicle::new("a", Speed::Medium).all_terrain();
        let env = PlanningEnv { track: &track, vehicle: &rugged, hazards: &hazards };
        assert_eq!(rollout.choose_action(&env, GridCell::new(1, 0), &mut rng), Action::ForwardMedium);
    }

    #[test]
    fn test_choose_action_hazard_depends_on_reliability() {
        let track = TrackBuilder::new(3, 6)
            .distractor(Distractor::new("cow", GridCell::new(1, 2), 0.4).unwrap())
            .build()
            .unwrap();
        let hazards = HazardMatrix::build(&track);
        let rollout = GreedyRollout::default();
        let mut rng = RaceRng::new(5);

        let fragile = Vehicle::new("f", Speed::Slow);
        let env = PlanningEnv { track: &track, vehicle: &fragile, hazards: &hazards };
        assert!(rollout.choose_action(&env, GridCell::new(1, 0), &mut rng).is_diagonal());

        let reliable = Vehicle::new("r", Speed::Slow).reliable();
        let env = PlanningEnv { track: &track, vehicle: &reliable, hazards: &hazards };
        assert_eq!(rollout.choose_action(&env, GridCell::new(1, 0), &mut rng), Action::ForwardSlow);
    }

    #[test]
    fn test_rollout_collision_penalty() {
        // Restricted vehicle boxed in: rocks east, edges north and south
        let track = TrackBuilder::new(1, 3)
            .prize(100.0)
            .obstacle(GridCell::new(0, 1))
            .goal(GridCell::new(0, 2))
            .build()
            .unwrap();
        let hazards = HazardMatrix::build(&track);
        let vehicle = Vehicle::new("v", Speed::Slow);
        let env = PlanningEnv { track: &track, vehicle: &vehicle, hazards: &hazards };
        let mut rng = RaceRng::new(2);

        // Swerves off-grid every step and stays put: 6 ordinary steps
        let value = GreedyRollout::default().simulate(&env, GridCell::new(0, 0), &mut rng);
        assert!((value - (-0.04 * 7.0)).abs() < 1e-9);

        // All-terrain drives through the rock onto the goal and pays for it
        let rugged = Vehicle::new("a", Speed::Medium).all_terrain();
        let env = PlanningEnv { track: &track, vehicle: &rugged, hazards: &hazards };
        let value = GreedyRollout::default().simulate(&env, GridCell::new(0, 0), &mut rng);
        assert!((value - (100.0 - 5.0 - 0.04)).abs() < 1e-9);
    }
}

//! The race transition model.
//!
//! Maps a race state and one action per player to the distribution of next
//! states. Every actor moves independently: players with steering error on
//! diagonals, opponents by the track's movement policy, distractors by a
//! Bernoulli draw. The joint distribution is their product.

use tracing::trace;

use super::costs::DamageCosts;
use super::distribution::Distribution;
use super::error::TransitionError;
use super::moves::{forward, furthest_move, resolve_candidate, Movement};
use super::state::{Opponent, Player, RaceState, RaceStatus};
use crate::core::{Action, Direction, GridCell, RaceRng};
use crate::track::{Distractor, Track, Vehicle};

/// Probability that a diagonal move lands on its intended cell.
pub const DIAGONAL_PROBABILITY: f64 = 0.7;

/// Probability of each of the three steering errors on a diagonal move
/// (cardinal drift, straight ahead, no movement).
pub const STEERING_ERROR_PROBABILITY: f64 = 0.1;

/// Transition model bound to one track.
#[derive(Clone, Debug)]
pub struct TransitionModel<'a> {
    track: &'a Track,
    costs: DamageCosts,
}

impl<'a> TransitionModel<'a> {
    /// Create a model with the default damage table.
    pub fn new(track: &'a Track) -> Self {
        Self::with_costs(track, DamageCosts::default())
    }

    pub fn with_costs(track: &'a Track, costs: DamageCosts) -> Self {
        Self { track, costs }
    }

    #[must_use]
    pub fn track(&self) -> &'a Track {
        self.track
    }

    #[must_use]
    pub fn costs(&self) -> &DamageCosts {
        &self.costs
    }

    /// Distribution of one player's movement for `action`.
    ///
    /// Forward actions beyond the vehicle's speed tier are downgraded first.
    /// Damage includes obstacle collisions and, when the destination holds a
    /// distractor that has appeared in `distractors`, the hazard cost.
    pub fn player_outcomes(
        &self,
        player: &Player,
        action: Action,
        distractors: &[Distractor],
    ) -> Result<Distribution<Movement>, TransitionError> {
        let vehicle = &player.vehicle;
        let origin = player.position;
        let action = vehicle.supported_action(action);

        let dist: Distribution<Movement> = match (action.diagonal(), action.cardinal()) {
            (Some(diagonal), Some(cardinal)) => [
                (origin.shifted(diagonal), DIAGONAL_PROBABILITY),
                (origin.shifted(cardinal), STEERING_ERROR_PROBABILITY),
                (origin.shifted(Direction::E), STEERING_ERROR_PROBABILITY),
                (origin, STEERING_ERROR_PROBABILITY),
            ]
            .into_iter()
            .map(|(candidate, p)| {
                let movement = resolve_candidate(self.track, vehicle, &self.costs, origin, candidate);
                (self.with_hazard(movement, vehicle, distractors), p)
            })
            .collect(),
            _ => {
                let movement = forward(
                    self.track,
                    vehicle,
                    &self.costs,
                    origin,
                    action.forward_distance(),
                );
                Distribution::certain(self.with_hazard(movement, vehicle, distractors))
            }
        };

        dist.validated("player movement")
    }

    /// Distribution of one opponent's next cell.
    ///
    /// Cells without a policy entry leave the opponent where it is.
    pub fn opponent_outcomes(&self, opponent: &Opponent) -> Result<Distribution<GridCell>, TransitionError> {
        let entries = self.track.opponent_policy().actions_at(opponent.position);
        if entries.is_empty() {
            return Ok(Distribution::certain(opponent.position));
        }
        entries
            .iter()
            .map(|&(action, p)| (furthest_move(self.track, opponent.position, action, false), p))
            .collect::<Distribution<_>>()
            .validated("opponent policy")
    }

    /// Distribution of a distractor's appearance next turn.
    pub fn distractor_outcomes(distractor: &Distractor) -> Result<Distribution<bool>, TransitionError> {
        let p = distractor.appear_probability();
        let mut dist = Distribution::new();
        if p > 0.0 {
            dist.add(true, p);
        }
        if p < 1.0 {
            dist.add(false, 1.0 - p);
        }
        dist.validated("distractor appearance")
    }

    /// Full distribution of next race states.
    ///
    /// `actions[i]` is the action of `state.players[i]`.
    pub fn next_states(
        &self,
        state: &RaceState,
        actions: &[Action],
    ) -> Result<Distribution<RaceState>, TransitionError> {
        self.check_actions(state, actions)?;

        let mut template = state.clone();
        template.turn = state.turn + 1;
        let mut partial: Vec<(RaceState, f64)> = vec![(template, 1.0)];

        for (i, (player, &action)) in state.players.iter().zip(actions).enumerate() {
            // States keep cell and damage only, so merge on those
            let outcomes: Distribution<(GridCell, f64)> = self
                .player_outcomes(player, action, &state.distractors)?
                .into_outcomes()
                .map(|(movement, p)| ((movement.cell, movement.damage), p))
                .collect();
            partial = expand(partial, &outcomes, |next, &(cell, damage)| {
                let p = &mut next.players[i];
                p.position = cell;
                p.damage += damage;
            });
        }

        for (i, opponent) in state.opponents.iter().enumerate() {
            let outcomes = self.opponent_outcomes(opponent)?;
            partial = expand(partial, &outcomes, |next, cell| {
                next.opponents[i].position = *cell;
            });
        }

        for (i, distractor) in state.distractors.iter().enumerate() {
            let outcomes = Self::distractor_outcomes(distractor)?;
            partial = expand(partial, &outcomes, |next, appeared| {
                next.distractors[i].appeared = *appeared;
            });
        }

        // Each actor's outcomes are already merged, so product states differ
        let dist = Distribution::from_distinct(partial.into_iter().map(|(mut next, p)| {
            next.status = self.status(&next.players, &next.opponents, next.turn);
            (next, p)
        }));

        trace!(turn = state.turn, outcomes = dist.len(), "expanded joint transition");
        dist.validated("joint transition")
    }

    /// Sample a single next state without enumerating the joint product.
    pub fn sample_next_state(
        &self,
        state: &RaceState,
        actions: &[Action],
        rng: &mut RaceRng,
    ) -> Result<RaceState, TransitionError> {
        self.check_actions(state, actions)?;

        let mut players = Vec::with_capacity(state.players.len());
        for (player, &action) in state.players.iter().zip(actions) {
            let outcomes = self.player_outcomes(player, action, &state.distractors)?;
            let movement = outcomes
                .sample(rng)
                .copied()
                .unwrap_or(Movement::stay(player.position));
            let mut next = player.clone();
            next.position = movement.cell;
            next.damage += movement.damage;
            players.push(next);
        }

        let mut opponents = Vec::with_capacity(state.opponents.len());
        for opponent in &state.opponents {
            let outcomes = self.opponent_outcomes(opponent)?;
            let cell = outcomes.sample(rng).copied().unwrap_or(opponent.position);
            opponents.push(Opponent::new(opponent.id.clone(), cell));
        }

        let distractors = state.distractors.iter().map(|d| d.resample(rng)).collect();

        let turn = state.turn + 1;
        let status = self.status(&players, &opponents, turn);
        Ok(RaceState {
            players,
            opponents,
            distractors,
            status,
            turn,
        })
    }

    /// Race status for the given positions at `turn`.
    #[must_use]
    pub fn status(&self, players: &[Player], opponents: &[Opponent], turn: u32) -> RaceStatus {
        RaceStatus::evaluate(self.track, players, opponents, turn)
    }

    fn check_actions(&self, state: &RaceState, actions: &[Action]) -> Result<(), TransitionError> {
        if actions.len() != state.players.len() {
            return Err(TransitionError::ActionCountMismatch {
                actions: actions.len(),
                players: state.players.len(),
            });
        }
        Ok(())
    }

    fn with_hazard(&self, mut movement: Movement, vehicle: &Vehicle, distractors: &[Distractor]) -> Movement {
        if distractors
            .iter()
            .any(|d| d.appeared && d.position == movement.cell)
        {
            movement.damage += self.costs.hazard(vehicle);
        }
        movement
    }
}

/// Multiply every partial state by one actor's outcomes.
fn expand<T>(
    partial: Vec<(RaceState, f64)>,
    outcomes: &Distribution<T>,
    apply: impl Fn(&mut RaceState, &T),
) -> Vec<(RaceState, f64)> {
    let mut next = Vec::with_capacity(partial.len() * outcomes.len());
    for (state, p) in &partial {
        for (outcome, q) in outcomes.iter() {
            let mut s = state.clone();
            apply(&mut s, outcome);
            next.push((s, p * q));
        }
    }
    next
}

//! Per-turn planning loop for a whole race.
//!
//! The driver builds the hazard matrix once per track, then every turn
//! builds a fresh planner for each player, picks its best action and
//! advances the race by sampling the transition model.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::PlannerConfig;
use super::search::{PlanError, Planner};
use super::stats::SearchStats;
use crate::core::{Action, GridCell, RaceRng};
use crate::sim::{RaceState, RaceStatus, TransitionError, TransitionModel};
use crate::track::{HazardMatrix, Track, Vehicle};

/// Errors raised while driving a race.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RaceError {
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Track {0} has no start positions")]
    NoStartPositions(String),
}

/// Result of planning one turn for one vehicle.
#[derive(Clone, Debug)]
pub struct TurnPlan {
    /// Recommended action; `None` when the root has no legal move.
    pub action: Option<Action>,
    /// Mean value at the root.
    pub value: f64,
    pub iterations: u32,
    pub stats: SearchStats,
}

/// Summary of a finished (or capped) race.
#[derive(Clone, Debug)]
pub struct RaceOutcome {
    pub final_state: RaceState,
    pub turns: u32,
    /// Actions taken each turn, one per player.
    pub actions: Vec<Vec<Action>>,
}

impl RaceOutcome {
    #[must_use]
    pub fn status(&self) -> RaceStatus {
        self.final_state.status
    }

    /// Damage accumulated by each player, in player order.
    #[must_use]
    pub fn damage(&self) -> Vec<(String, f64)> {
        self.final_state
            .players
            .iter()
            .map(|p| (p.id.clone(), p.damage))
            .collect()
    }
}

/// Plans and plays races on one track.
pub struct RaceDriver<'a> {
    track: &'a Track,
    hazards: HazardMatrix,
    model: TransitionModel<'a>,
    config: PlannerConfig,
    rng: RaceRng,
}

impl<'a> RaceDriver<'a> {
    pub fn new(track: &'a Track, config: PlannerConfig) -> Self {
        Self {
            track,
            hazards: HazardMatrix::build(track),
            model: TransitionModel::with_costs(track, config.costs.clone()),
            rng: RaceRng::new(config.seed),
            config,
        }
    }

    #[must_use]
    pub fn hazards(&self) -> &HazardMatrix {
        &self.hazards
    }

    #[must_use]
    pub fn model(&self) -> &TransitionModel<'a> {
        &self.model
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Search from `cell` with the configured turn budget.
    pub fn plan(&mut self, vehicle: &Vehicle, cell: GridCell) -> Result<TurnPlan, RaceError> {
        let mut planner = Planner::new(cell, vehicle, self.track, &self.hazards, self.config.clone())?
            .with_rng(self.rng.fork());
        let iterations = planner.run(self.config.turn_budget);
        Ok(TurnPlan {
            action: planner.best_action(),
            value: planner.root_value(),
            iterations,
            stats: planner.stats().clone(),
        })
    }

    /// Plan the next move of the player named `id`.
    pub fn plan_player(&mut self, state: &RaceState, id: &str) -> Result<TurnPlan, RaceError> {
        let player = state
            .player(id)
            .ok_or_else(|| RaceError::UnknownPlayer(id.to_string()))?;
        let (vehicle, cell) = (player.vehicle.clone(), player.position);
        self.plan(&vehicle, cell)
    }

    /// Start position with the highest root value for `vehicle`.
    ///
    /// Ties go to the earliest start position.
    pub fn choose_start(&mut self, vehicle: &Vehicle) -> Result<(GridCell, f64), RaceError> {
        let track = self.track;
        let mut best: Option<(GridCell, f64)> = None;
        for &cell in track.start_positions() {
            let plan = self.plan(vehicle, cell)?;
            debug!(start = %cell, value = plan.value, "evaluated start position");
            if best.map_or(true, |(_, v)| plan.value > v) {
                best = Some((cell, plan.value));
            }
        }
        best.ok_or_else(|| RaceError::NoStartPositions(track.name().to_string()))
    }

    /// Plan every player's action and sample the next state.
    ///
    /// A player without a legal move stays in place.
    pub fn step(&mut self, state: &RaceState) -> Result<(Vec<Action>, RaceState), RaceError> {
        let mut actions = Vec::with_capacity(state.players.len());
        for player in &state.players {
            let plan = self.plan(&player.vehicle, player.position)?;
            let action = plan.action.unwrap_or_else(|| {
                warn!(player = %player.id, cell = %player.position, "no legal action, staying");
                Action::Stay
            });
            actions.push(action);
        }

        let next = self.model.sample_next_state(state, &actions, &mut self.rng)?;
        debug!(
            turn = next.turn,
            actions = ?actions,
            status = ?next.status,
            "race turn"
        );
        Ok((actions, next))
    }

    /// Play turns until the race finishes or the turn cap is hit.
    pub fn run_race(&mut self, initial: RaceState) -> Result<RaceOutcome, RaceError> {
        info!(
            track = self.track.name(),
            players = initial.players.len(),
            opponents = initial.opponents.len(),
            "race started"
        );

        let mut state = initial;
        let mut history = Vec::new();
        let mut turns = 0;
        while !state.is_finished() && turns < self.config.max_race_turns {
            let (actions, next) = self.step(&state)?;
            history.push(actions);
            state = next;
            turns += 1;
        }

        info!(
            track = self.track.name(),
            turns,
            status = ?state.status,
            "race finished"
        );
        Ok(RaceOutcome {
            final_state: state,
            turns,
            actions: history,
        })
    }
}

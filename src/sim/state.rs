//! Race state: players, opponents, distractors and race status.

use serde::{Deserialize, Serialize};

use crate::core::GridCell;
use crate::track::{Distractor, Track, Vehicle};

/// Outcome of the race so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceStatus {
    #[default]
    Racing,
    Won,
    Lost,
}

impl RaceStatus {
    /// Determine the status after a turn.
    ///
    /// A player on a goal cell wins. Otherwise the race is lost if an
    /// opponent reached a goal, or if there are no opponents and `turn`
    /// exceeds twice the track width.
    #[must_use]
    pub fn evaluate(track: &Track, players: &[Player], opponents: &[Opponent], turn: u32) -> Self {
        if players.iter().any(|p| track.is_goal(p.position)) {
            return RaceStatus::Won;
        }
        let opponent_won = opponents.iter().any(|o| track.is_goal(o.position));
        let out_of_time = opponents.is_empty() && turn as usize > 2 * track.cols();
        if opponent_won || out_of_time {
            RaceStatus::Lost
        } else {
            RaceStatus::Racing
        }
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, RaceStatus::Racing)
    }
}

/// A planned (controlled) vehicle on the track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub vehicle: Vehicle,
    pub position: GridCell,
    /// Damage accumulated so far in the race.
    pub damage: f64,
}

impl Player {
    pub fn new(id: impl Into<String>, vehicle: Vehicle, position: GridCell) -> Self {
        Self {
            id: id.into(),
            vehicle,
            position,
            damage: 0.0,
        }
    }
}

/// A rival vehicle driven by the track's fixed movement policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opponent {
    pub id: String,
    pub position: GridCell,
}

impl Opponent {
    pub fn new(id: impl Into<String>, position: GridCell) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Full state of a race at the start of a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    pub players: Vec<Player>,
    pub opponents: Vec<Opponent>,
    pub distractors: Vec<Distractor>,
    pub status: RaceStatus,
    pub turn: u32,
}

impl RaceState {
    /// Turn-zero state with the track's distractors hidden.
    pub fn new(track: &Track, players: Vec<Player>, opponents: Vec<Opponent>) -> Self {
        let distractors = track
            .distractors()
            .iter()
            .map(|d| d.with_appeared(false))
            .collect();
        let status = RaceStatus::evaluate(track, &players, &opponents, 0);
        Self {
            players,
            opponents,
            distractors,
            status,
            turn: 0,
        }
    }

    /// Whether an appeared distractor sits on `cell`.
    #[must_use]
    pub fn has_appeared_distractor(&self, cell: GridCell) -> bool {
        self.distractors
            .iter()
            .any(|d| d.appeared && d.position == cell)
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}

//! Deterministic movement primitives.
//!
//! Shared by the transition model (which layers steering error and
//! distractor damage on top), the rollout simulator and node expansion.

use smallvec::SmallVec;

use super::costs::DamageCosts;
use crate::core::{Action, Direction, GridCell};
use crate::track::{Track, Vehicle};

/// Result of one deterministic movement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    /// Cell the vehicle ends up in.
    pub cell: GridCell,
    /// Obstacle damage accrued on the way.
    pub damage: f64,
    /// Number of obstacle collisions.
    pub collisions: u32,
}

impl Movement {
    /// Staying put without damage.
    #[must_use]
    pub const fn stay(cell: GridCell) -> Self {
        Self {
            cell,
            damage: 0.0,
            collisions: 0,
        }
    }
}

/// Drive up to `distance` cells east.
///
/// Movement stops at the track edge. An obstacle costs one collision; an
/// all-terrain vehicle carries on through it, a restricted one stops in the
/// last clear cell.
#[must_use]
pub fn forward(
    track: &Track,
    vehicle: &Vehicle,
    costs: &DamageCosts,
    from: GridCell,
    distance: usize,
) -> Movement {
    let mut movement = Movement::stay(from);
    for _ in 0..distance {
        let next = movement.cell.shifted(Direction::E);
        if !track.in_bounds(next) {
            break;
        }
        if track.is_obstacle(next) {
            movement.collisions += 1;
            movement.damage += costs.obstacle(vehicle);
            if !vehicle.all_terrain {
                break;
            }
        }
        movement.cell = next;
    }
    movement
}

/// Resolve a single-cell move from `origin` to `candidate`.
///
/// Off-grid candidates leave the vehicle at `origin` without damage. An
/// obstacle candidate costs one collision; restricted vehicles bounce back
/// to `origin`.
#[must_use]
pub fn resolve_candidate(
    track: &Track,
    vehicle: &Vehicle,
    costs: &DamageCosts,
    origin: GridCell,
    candidate: GridCell,
) -> Movement {
    if !track.in_bounds(candidate) {
        return Movement::stay(origin);
    }
    if track.is_obstacle(candidate) {
        return Movement {
            cell: if vehicle.all_terrain { candidate } else { origin },
            damage: costs.obstacle(vehicle),
            collisions: 1,
        };
    }
    Movement::stay(candidate)
}

/// Furthest cell reachable by `action` without steering error or damage.
///
/// Used for opponents, which follow their policy exactly.
#[must_use]
pub fn furthest_move(track: &Track, from: GridCell, action: Action, all_terrain: bool) -> GridCell {
    if let Some(direction) = action.diagonal() {
        let target = from.shifted(direction);
        return if track.is_passable(target, all_terrain) { target } else { from };
    }

    let mut cell = from;
    for _ in 0..action.forward_distance() {
        let next = cell.shifted(Direction::E);
        if !track.is_passable(next, all_terrain) {
            break;
        }
        cell = next;
    }
    cell
}

/// Structurally legal moves from `from`, with their intended destinations.
///
/// Forward moves come first in increasing distance, then NE and SE. A
/// forward move is only offered if every cell on the way is passable for
/// the vehicle and the speed tier allows it.
#[must_use]
pub fn legal_moves(track: &Track, vehicle: &Vehicle, from: GridCell) -> SmallVec<[(Action, GridCell); 5]> {
    let mut moves = SmallVec::new();

    let mut cell = from;
    for step in 1..=vehicle.speed.max_moves() {
        cell = cell.shifted(Direction::E);
        if !track.is_passable(cell, vehicle.all_terrain) {
            break;
        }
        moves.push((Action::forward(step), cell));
    }

    for action in [Action::NorthEast, Action::SouthEast] {
        if let Some(direction) = action.diagonal() {
            let target = from.shifted(direction);
            if track.is_passable(target, vehicle.all_terrain) {
                moves.push((action, target));
            }
        }
    }

    moves
}

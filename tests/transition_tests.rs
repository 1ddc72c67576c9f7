//! Transition model integration and property tests.

use proptest::prelude::*;

use race_planner::core::{Action, GridCell, RaceRng};
use race_planner::sim::{Opponent, Player, RaceState, RaceStatus, TransitionError, TransitionModel};
use race_planner::track::{Distractor, MovementPolicy, Speed, Track, TrackBuilder, Vehicle};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// 6x8 track with a rock wall segment, two distractors and a busy opponent.
fn mixed_track() -> Track {
    let policy = MovementPolicy::new()
        .with(
            GridCell::new(0, 0),
            &[(Action::ForwardFast, 0.5), (Action::SouthEast, 0.3), (Action::Stay, 0.2)],
        )
        .unwrap()
        .with(GridCell::new(5, 0), &[(Action::NorthEast, 1.0)])
        .unwrap();

    TrackBuilder::new(6, 8)
        .prize(80.0)
        .goal_column(7)
        .obstacles([GridCell::new(2, 2), GridCell::new(3, 2), GridCell::new(3, 4)])
        .distractor(Distractor::new("cat", GridCell::new(1, 3), 0.4).unwrap())
        .distractor(Distractor::new("dog", GridCell::new(4, 5), 0.9).unwrap())
        .opponent_policy(policy)
        .build()
        .unwrap()
}

fn speed_strategy() -> impl Strategy<Value = Speed> {
    prop_oneof![Just(Speed::Slow), Just(Speed::Medium), Just(Speed::Fast)]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_obstacle_east_of_restricted_vehicle() {
    let track = mixed_track();
    let model = TransitionModel::new(&track);
    let state = RaceState::new(
        &track,
        vec![Player::new("p1", Vehicle::new("bike", Speed::Medium), GridCell::new(2, 1))],
        vec![],
    );

    let dist = model.next_states(&state, &[Action::ForwardSlow]).unwrap();
    let positions: Vec<(GridCell, f64, f64)> = dist
        .iter()
        .map(|(s, p)| (s.players[0].position, s.players[0].damage, p))
        .collect();
    // Distractor outcomes split the mass but the player is always in place
    assert!(positions.iter().all(|(cell, damage, _)| *cell == GridCell::new(2, 1) && *damage == 50.0));
    assert!(close(positions.iter().map(|(_, _, p)| p).sum::<f64>(), 1.0));
}

#[test]
fn test_distractor_certainties_after_one_resample() {
    let track = TrackBuilder::new(2, 4)
        .distractor(Distractor::new("always", GridCell::new(0, 2), 1.0).unwrap())
        .distractor(Distractor::new("never", GridCell::new(1, 2), 0.0).unwrap())
        .build()
        .unwrap();
    let model = TransitionModel::new(&track);
    let state = RaceState::new(
        &track,
        vec![Player::new("p1", Vehicle::new("bike", Speed::Slow), GridCell::new(0, 0))],
        vec![],
    );

    let mut rng = RaceRng::new(99);
    for _ in 0..20 {
        let next = model
            .sample_next_state(&state, &[Action::Stay], &mut rng)
            .unwrap();
        assert!(next.distractors[0].appeared);
        assert!(!next.distractors[1].appeared);
    }

    let dist = model.next_states(&state, &[Action::Stay]).unwrap();
    assert_eq!(dist.len(), 1);
}

#[test]
fn test_opponent_reaching_goal_loses_race() {
    let policy = MovementPolicy::new()
        .with(GridCell::new(0, 1), &[(Action::ForwardMedium, 1.0)])
        .unwrap();
    let track = TrackBuilder::new(3, 4)
        .goal_column(3)
        .opponent_policy(policy)
        .build()
        .unwrap();
    let model = TransitionModel::new(&track);
    let state = RaceState::new(
        &track,
        vec![Player::new("p1", Vehicle::new("bike", Speed::Slow), GridCell::new(2, 0))],
        vec![Opponent::new("o1", GridCell::new(0, 1))],
    );

    let dist = model.next_states(&state, &[Action::ForwardSlow]).unwrap();
    assert_eq!(dist.len(), 1);
    let (next, _) = dist.iter().next().unwrap();
    assert_eq!(next.opponents[0].position, GridCell::new(0, 3));
    assert_eq!(next.status, RaceStatus::Lost);
}

#[test]
fn test_two_players_need_two_actions() {
    let track = mixed_track();
    let model = TransitionModel::new(&track);
    let state = RaceState::new(
        &track,
        vec![
            Player::new("p1", Vehicle::new("a", Speed::Slow), GridCell::new(0, 0)),
            Player::new("p2", Vehicle::new("b", Speed::Fast), GridCell::new(5, 0)),
        ],
        vec![],
    );

    assert!(matches!(
        model.next_states(&state, &[Action::ForwardSlow]),
        Err(TransitionError::ActionCountMismatch { actions: 1, players: 2 })
    ));
    assert!(model
        .next_states(&state, &[Action::ForwardSlow, Action::NorthEast])
        .is_ok());
}

#[test]
fn test_sampling_matches_enumeration() {
    let track = mixed_track();
    let model = TransitionModel::new(&track);
    let state = RaceState::new(
        &track,
        vec![Player::new("p1", Vehicle::new("bike", Speed::Medium), GridCell::new(1, 1))],
        vec![Opponent::new("o1", GridCell::new(0, 0))],
    );
    let actions = [Action::NorthEast];
    let dist = model.next_states(&state, &actions).unwrap();

    let mut rng = RaceRng::new(5);
    let samples = 4000;
    let mut on_target = 0;
    for _ in 0..samples {
        let next = model.sample_next_state(&state, &actions, &mut rng).unwrap();
        assert!(dist.probability(&next) > 0.0, "sampled an impossible state");
        if next.players[0].position == GridCell::new(0, 2) {
            on_target += 1;
        }
    }
    let rate = on_target as f64 / samples as f64;
    assert!((rate - 0.7).abs() < 0.05, "diagonal hit rate {rate}");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_joint_distribution_sums_to_one(
        row in 0i32..6,
        col in 0i32..7,
        speed in speed_strategy(),
        all_terrain in any::<bool>(),
        reliable in any::<bool>(),
        action in action_strategy(),
    ) {
        let track = mixed_track();
        let model = TransitionModel::new(&track);
        let mut vehicle = Vehicle::new("v", speed);
        vehicle.all_terrain = all_terrain;
        vehicle.reliable = reliable;
        let state = RaceState::new(
            &track,
            vec![Player::new("p1", vehicle, GridCell::new(row, col))],
            vec![Opponent::new("o1", GridCell::new(0, 0)), Opponent::new("o2", GridCell::new(5, 0))],
        );

        let dist = model.next_states(&state, &[action]).unwrap();
        prop_assert!((dist.total() - 1.0).abs() <= 1e-9);
        prop_assert!(dist.iter().all(|(_, p)| p >= 0.0));
    }

    #[test]
    fn prop_forward_travel_within_tier(
        row in 0i32..6,
        col in 0i32..7,
        speed in speed_strategy(),
        all_terrain in any::<bool>(),
        action in prop::sample::select(vec![Action::ForwardSlow, Action::ForwardMedium, Action::ForwardFast]),
    ) {
        let track = mixed_track();
        let model = TransitionModel::new(&track);
        let mut vehicle = Vehicle::new("v", speed);
        vehicle.all_terrain = all_terrain;
        let player = Player::new("p1", vehicle, GridCell::new(row, col));

        let dist = model.player_outcomes(&player, action, &[]).unwrap();
        prop_assert_eq!(dist.len(), 1);
        for (movement, _) in dist.iter() {
            prop_assert_eq!(movement.cell.row, row);
            let travelled = (movement.cell.col - col) as usize;
            prop_assert!(travelled <= speed.max_moves());
            prop_assert!(travelled <= action.forward_distance());
        }
    }

    #[test]
    fn prop_all_terrain_charged_per_obstacle(start in 0i32..4, rocks in prop::collection::vec(any::<bool>(), 3)) {
        let cells: Vec<GridCell> = rocks
            .iter()
            .enumerate()
            .filter(|(_, rock)| **rock)
            .map(|(i, _)| GridCell::new(0, start + 1 + i as i32))
            .collect();
        let track = TrackBuilder::new(1, 8).obstacles(cells.iter().copied()).build().unwrap();
        let model = TransitionModel::new(&track);
        let player = Player::new("p1", Vehicle::new("v", Speed::Fast).all_terrain(), GridCell::new(0, start));

        let dist = model.player_outcomes(&player, Action::ForwardFast, &[]).unwrap();
        let (movement, _) = dist.iter().next().unwrap();
        prop_assert_eq!(movement.cell, GridCell::new(0, start + 3));
        prop_assert_eq!(movement.collisions as usize, cells.len());
        prop_assert!((movement.damage - 5.0 * cells.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn prop_diagonal_outcomes_fold_to_one(
        row in 0i32..6,
        col in 0i32..8,
        all_terrain in any::<bool>(),
        north in any::<bool>(),
    ) {
        let track = mixed_track();
        let model = TransitionModel::new(&track);
        let mut vehicle = Vehicle::new("v", Speed::Slow);
        vehicle.all_terrain = all_terrain;
        let player = Player::new("p1", vehicle, GridCell::new(row, col));
        let action = if north { Action::NorthEast } else { Action::SouthEast };

        let dist = model.player_outcomes(&player, action, &[]).unwrap();
        prop_assert!(dist.len() <= 4);
        prop_assert!((dist.total() - 1.0).abs() <= 1e-9);
    }
}

//! Core MCTS search algorithm.
//!
//! One planner owns one tree for one turn. Each iteration descends from the
//! root with the selection policy, expands the first leaf it meets, values
//! one new child with the simulation policy and backs the value up to the
//! root. Goal nodes are worth the track prize and dead ends its negation.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::config::{PlannerConfig, SearchBudget};
use super::node::{Edge, NodeId, NodeState, SearchNode};
use super::policy::{PlanningEnv, SelectionPolicy, SimulationPolicy, Uct};
use super::rollout::GreedyRollout;
use super::stats::SearchStats;
use super::tree::SearchTree;
use crate::core::{Action, GridCell, RaceRng};
use crate::sim::moves::legal_moves;
use crate::track::{HazardMatrix, Track, Vehicle};

/// Errors raised when setting up a search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("Root cell {cell} is outside the {rows}x{cols} track")]
    RootOutOfBounds { cell: GridCell, rows: usize, cols: usize },
}

/// Monte Carlo tree search over the planned vehicle's cell.
///
/// Borrows the track, vehicle and hazard matrix for its whole lifetime and
/// owns its tree exclusively. Build a new planner for every turn.
pub struct Planner<'a> {
    env: PlanningEnv<'a>,

    config: PlannerConfig,

    tree: SearchTree,

    /// RNG for rollouts.
    rng: RaceRng,

    selection: Box<dyn SelectionPolicy>,

    simulation: Box<dyn SimulationPolicy>,

    stats: SearchStats,
}

impl<'a> Planner<'a> {
    /// Create a planner rooted at `root`.
    pub fn new(
        root: GridCell,
        vehicle: &'a Vehicle,
        track: &'a Track,
        hazards: &'a HazardMatrix,
        config: PlannerConfig,
    ) -> Result<Self, PlanError> {
        if !track.in_bounds(root) {
            return Err(PlanError::RootOutOfBounds {
                cell: root,
                rows: track.rows(),
                cols: track.cols(),
            });
        }

        let tree = SearchTree::with_capacity(root, track.is_goal(root), config.max_nodes.min(4096));
        let rng = RaceRng::new(config.seed);
        let simulation = Box::new(GreedyRollout::from_config(&config));

        Ok(Self {
            env: PlanningEnv {
                track,
                vehicle,
                hazards,
            },
            config,
            tree,
            rng,
            selection: Box::new(Uct),
            simulation,
            stats: SearchStats::default(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Replace the seeded RNG, e.g. with a fork of a race-level RNG.
    pub fn with_rng(mut self, rng: RaceRng) -> Self {
        self.rng = rng;
        self
    }

    /// Iterate until `budget` of wall-clock time has elapsed.
    ///
    /// The clock is only checked between iterations. Returns the number of
    /// iterations completed.
    pub fn run_iterations(&mut self, budget: Duration) -> u32 {
        let start = Instant::now();
        let mut completed = 0;
        while start.elapsed() < budget {
            if !self.iterate() {
                break;
            }
            completed += 1;
        }
        self.finish(start, completed);
        completed
    }

    /// Run a search with the given budget.
    pub fn run(&mut self, budget: SearchBudget) -> u32 {
        match budget {
            SearchBudget::Time(duration) => self.run_iterations(duration),
            SearchBudget::Iterations(count) => {
                let start = Instant::now();
                let mut completed = 0;
                for _ in 0..count {
                    if !self.iterate() {
                        break;
                    }
                    completed += 1;
                }
                self.finish(start, completed);
                completed
            }
        }
    }

    /// One select/expand/simulate/backup pass.
    ///
    /// Returns `false` without touching the tree once the node limit is
    /// reached.
    pub fn iterate(&mut self) -> bool {
        if self.tree.len() >= self.config.max_nodes {
            warn!(
                nodes = self.tree.len(),
                max_nodes = self.config.max_nodes,
                "node limit reached, stopping search"
            );
            return false;
        }

        let prize = self.env.track.prize();
        let mut current = self.tree.root();

        let (leaf, value) = loop {
            let node = self.tree.get(current);
            match node.state {
                NodeState::Goal => {
                    self.stats.goal_hits += 1;
                    break (current, prize);
                }
                NodeState::DeadEnd => {
                    self.stats.dead_ends += 1;
                    break (current, -prize);
                }
                NodeState::Expanded => match self.selection.select(&self.tree, node, prize, &self.config) {
                    Some(idx) => current = node.edges[idx].child,
                    None => {
                        self.stats.dead_ends += 1;
                        break (current, -prize);
                    }
                },
                NodeState::Leaf => {
                    self.expand(current);
                    let node = self.tree.get(current);
                    let Some(idx) = self.selection.select(&self.tree, node, prize, &self.config) else {
                        self.stats.dead_ends += 1;
                        break (current, -prize);
                    };
                    let child = node.edges[idx].child;
                    let cell = self.tree.get(child).cell;
                    let value = self.simulation.simulate(&self.env, cell, &mut self.rng);
                    self.stats.rollouts += 1;
                    break (child, value);
                }
            }
        };

        self.tree.backup(leaf, value);
        self.stats.iterations += 1;
        trace!(
            iteration = self.stats.iterations,
            depth = self.tree.get(leaf).depth,
            value,
            "search iteration"
        );
        true
    }

    /// Generate one child per legal move of a leaf.
    fn expand(&mut self, node_id: NodeId) {
        let node = self.tree.get(node_id);
        let cell = node.cell;
        let depth = node.depth.saturating_add(1);
        let moves = legal_moves(self.env.track, self.env.vehicle, cell);

        for (i, (action, target)) in moves.into_iter().enumerate() {
            let mut child = SearchNode::new(target, node_id, i as u16, depth);
            if self.env.track.is_goal(target) {
                child.state = NodeState::Goal;
            }
            let child_id = self.tree.alloc(child);
            self.tree.get_mut(node_id).edges.push(Edge::new(action, child_id));
        }

        let node = self.tree.get_mut(node_id);
        node.state = if node.edges.is_empty() {
            NodeState::DeadEnd
        } else {
            NodeState::Expanded
        };

        self.stats.nodes_expanded += 1;
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }
    }

    fn finish(&mut self, start: Instant, completed: u32) {
        self.stats.time_us += start.elapsed().as_micros() as u64;
        debug!(
            root = %self.tree.root_node().cell,
            iterations = completed,
            nodes = self.tree.len(),
            root_value = self.root_value(),
            best = ?self.best_action(),
            "search finished"
        );
    }

    /// Action whose child has the highest mean value.
    ///
    /// Only children visited at least once compete; ties go to the earliest
    /// edge. Falls back to the first edge if none was visited and returns
    /// `None` if the root has no children.
    #[must_use]
    pub fn best_action(&self) -> Option<Action> {
        let root = self.tree.root_node();
        let mut best: Option<(Action, f64)> = None;
        for edge in root.edges.iter().filter(|e| e.visits > 0) {
            let value = self.tree.get(edge.child).mean_value();
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((edge.action, value));
            }
        }
        best.map(|(action, _)| action)
            .or_else(|| root.edges.first().map(|e| e.action))
    }

    /// Mean value at the root.
    #[must_use]
    pub fn root_value(&self) -> f64 {
        self.tree.root_node().mean_value()
    }

    /// `(action, child mean value, visits)` for every root edge.
    #[must_use]
    pub fn action_values(&self) -> Vec<(Action, f64, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.action, self.tree.get(e.child).mean_value(), e.visits))
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[must_use]
    pub fn root_cell(&self) -> GridCell {
        self.tree.root_node().cell
    }
}

//! Search policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: which child to descend into (UCT)
//! - `SimulationPolicy`: how to estimate the value of a fresh node (rollouts)

use super::config::PlannerConfig;
use super::node::SearchNode;
use super::tree::SearchTree;
use crate::core::{GridCell, RaceRng};
use crate::track::{HazardMatrix, Track, Vehicle};

/// Read-only context shared by every node of one search.
#[derive(Clone, Copy, Debug)]
pub struct PlanningEnv<'a> {
    pub track: &'a Track,
    pub vehicle: &'a Vehicle,
    pub hazards: &'a HazardMatrix,
}

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select an edge index of an expanded `node`.
    ///
    /// `value_scale` is the magnitude of a decisive outcome (the track
    /// prize); child means are divided by it before exploration is added.
    /// Returns `None` only when the node has no edges.
    fn select(
        &self,
        tree: &SearchTree,
        node: &SearchNode,
        value_scale: f64,
        config: &PlannerConfig,
    ) -> Option<usize>;
}

/// Upper Confidence bounds applied to Trees.
///
/// Score: child mean / scale + c * sqrt(ln(N) / n(a)), with the track prize
/// as the scale. An edge that was never taken is selected before the formula
/// is applied to any sibling. Ties go to the earliest edge.
#[derive(Clone, Debug, Default)]
pub struct Uct;

impl SelectionPolicy for Uct {
    fn select(
        &self,
        tree: &SearchTree,
        node: &SearchNode,
        value_scale: f64,
        config: &PlannerConfig,
    ) -> Option<usize> {
        if node.edges.is_empty() {
            return None;
        }
        if let Some(idx) = node.first_unvisited() {
            return Some(idx);
        }

        let scale = if value_scale > 0.0 { value_scale } else { 1.0 };
        let ln_parent = (node.visits.max(1) as f64).ln();
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, edge) in node.edges.iter().enumerate() {
            let exploitation = tree.get(edge.child).mean_value() / scale;
            let exploration = config.balancing_factor * (ln_parent / edge.visits as f64).sqrt();
            let score = exploitation + exploration;
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        Some(best)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for estimating the value of a newly reached cell.
pub trait SimulationPolicy: Send + Sync {
    /// Approximate value of the vehicle standing on `start`.
    fn simulate(&self, env: &PlanningEnv<'_>, start: GridCell, rng: &mut RaceRng) -> f64;
}

//! Planner configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::DamageCosts;

/// How long a single search runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchBudget {
    /// Iterate until the wall-clock budget elapses.
    Time(Duration),
    /// Run exactly this many iterations (reproducible).
    Iterations(u32),
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Time(Duration::from_millis(1500))
    }
}

/// Planner configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// UCT balancing factor between mean reward and exploration.
    /// Means are measured in units of the track prize.
    pub balancing_factor: f64,

    /// Rollout look-ahead, as a multiple of the vehicle's forward range.
    pub look_factor: usize,

    /// Per-step multiplicative discount applied during rollouts
    /// (1.0 = no decay).
    pub discount: f64,

    /// Rollout cost of entering an ordinary cell.
    pub step_cost: f64,

    /// Maximum nodes to allocate in the tree.
    /// The search stops early once reached.
    pub max_nodes: usize,

    /// Random seed. Same seed and iteration budget produce the same search.
    pub seed: u64,

    /// Search budget per race turn.
    pub turn_budget: SearchBudget,

    /// Turn cap for a full race.
    pub max_race_turns: u32,

    /// Damage table shared with the transition model.
    pub costs: DamageCosts,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            balancing_factor: 1.0,
            look_factor: 3,
            discount: 1.0,
            step_cost: 0.04,
            max_nodes: 1_000_000,
            seed: 42,
            turn_budget: SearchBudget::default(),
            max_race_turns: 500,
            costs: DamageCosts::default(),
        }
    }
}

impl PlannerConfig {
    pub fn with_balancing_factor(mut self, c: f64) -> Self {
        self.balancing_factor = c;
        self
    }

    pub fn with_look_factor(mut self, factor: usize) -> Self {
        self.look_factor = factor;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_step_cost(mut self, cost: f64) -> Self {
        self.step_cost = cost;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_turn_budget(mut self, budget: SearchBudget) -> Self {
        self.turn_budget = budget;
        self
    }

    pub fn with_max_race_turns(mut self, turns: u32) -> Self {
        self.max_race_turns = turns;
        self
    }

    pub fn with_costs(mut self, costs: DamageCosts) -> Self {
        self.costs = costs;
        self
    }
}

//! Search node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Action, GridCell};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Expansion state of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    /// Not yet expanded.
    #[default]
    Leaf,
    /// Children generated.
    Expanded,
    /// The node's cell is a goal.
    Goal,
    /// Expanded without any legal move.
    DeadEnd,
}

impl NodeState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, NodeState::Goal | NodeState::DeadEnd)
    }
}

/// Edge from a parent node to the child reached by an action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub action: Action,
    pub child: NodeId,
    /// Times this action was taken from the parent.
    pub visits: u32,
}

impl Edge {
    pub fn new(action: Action, child: NodeId) -> Self {
        Self {
            action,
            child,
            visits: 0,
        }
    }
}

/// A node in the search tree: one cell reached by the planned vehicle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    pub cell: GridCell,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the edge from parent that led to this node.
    pub parent_edge_idx: u16,

    /// Depth in tree (root = 0).
    pub depth: u32,

    pub visits: u32,

    /// Sum of every value backed up through this node.
    pub total_reward: f64,

    pub state: NodeState,

    /// Outgoing edges, in expansion order.
    pub edges: SmallVec<[Edge; 5]>,
}

impl SearchNode {
    pub fn new(cell: GridCell, parent: NodeId, parent_edge_idx: u16, depth: u32) -> Self {
        Self {
            cell,
            parent,
            parent_edge_idx,
            depth,
            visits: 0,
            total_reward: 0.0,
            state: NodeState::Leaf,
            edges: SmallVec::new(),
        }
    }

    pub fn root(cell: GridCell) -> Self {
        Self::new(cell, NodeId::NONE, 0, 0)
    }

    /// Mean backed-up value (0 before the first visit).
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// First edge that has never been taken.
    #[must_use]
    pub fn first_unvisited(&self) -> Option<usize> {
        self.edges.iter().position(|e| e.visits == 0)
    }
}

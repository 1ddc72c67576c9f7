//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. Every node
//! stores its parent's index, so backup walks up the arena without any
//! back-pointers.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, NodeState, SearchNode};
use crate::core::GridCell;

/// Arena-based search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only a root at `root_cell`.
    pub fn new(root_cell: GridCell, root_is_goal: bool) -> Self {
        Self::with_capacity(root_cell, root_is_goal, 1024)
    }

    pub fn with_capacity(root_cell: GridCell, root_is_goal: bool, capacity: usize) -> Self {
        let mut root = SearchNode::root(root_cell);
        if root_is_goal {
            root.state = NodeState::Goal;
        }
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Add `value` to every node from `leaf` up to the root.
    ///
    /// Each node's visit count grows by one, and so does the visit count of
    /// the edge that leads into it from its parent.
    pub fn backup(&mut self, leaf: NodeId, value: f64) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.total_reward += value;
            let parent = node.parent;
            let edge_idx = node.parent_edge_idx as usize;
            if !parent.is_none() {
                self.get_mut(parent).edges[edge_idx].visits += 1;
            }
            current = parent;
        }
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let goal_count = self.nodes.iter().filter(|n| n.state == NodeState::Goal).count();
        let dead_end_count = self
            .nodes
            .iter()
            .filter(|n| n.state == NodeState::DeadEnd)
            .count();
        let total_edges: usize = self.nodes.iter().map(|n| n.edges.len()).sum();
        let visited_edges = self
            .nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .filter(|e| e.visits > 0)
            .count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            goal_count,
            dead_end_count,
            total_edges,
            visited_edges,
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u32,
    pub goal_count: usize,
    pub dead_end_count: usize,
    pub total_edges: usize,
    /// Edges taken at least once.
    pub visited_edges: usize,
}

impl TreeStats {
    /// Average edges per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::mcts::node::Edge;

    /// Root with two children; the second child has one grandchild.
    fn small_tree() -> (SearchTree, NodeId, NodeId, NodeId) {
        let mut tree = SearchTree::new(GridCell::new(1, 0), false);
        let root = tree.root();
        let a = tree.alloc(SearchNode::new(GridCell::new(0, 1), root, 0, 1));
        let b = tree.alloc(SearchNode::new(GridCell::new(1, 1), root, 1, 1));
        let c = tree.alloc(SearchNode::new(GridCell::new(1, 2), b, 0, 2));
        tree.get_mut(root).edges.push(Edge::new(Action::NorthEast, a));
        tree.get_mut(root).edges.push(Edge::new(Action::ForwardSlow, b));
        tree.get_mut(b).edges.push(Edge::new(Action::ForwardSlow, c));
        (tree, a, b, c)
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(GridCell::new(2, 0), false);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_node().state, NodeState::Leaf);

        let goal = SearchTree::new(GridCell::new(2, 4), true);
        assert_eq!(goal.root_node().state, NodeState::Goal);
    }

    #[test]
    fn test_tree_alloc() {
        let (tree, a, _, c) = small_tree();
        assert_eq!(a, NodeId::new(1));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get(c).cell, GridCell::new(1, 2));
    }

    #[test]
    fn test_backup_accumulates_along_path() {
        let (mut tree, a, b, c) = small_tree();
        tree.backup(c, 10.0);
        tree.backup(c, -4.0);
        tree.backup(a, 1.0);

        let root = tree.root_node();
        assert_eq!(root.visits, 3);
        assert_eq!(root.total_reward, 7.0);
        assert_eq!(root.edges[0].visits, 1);
        assert_eq!(root.edges[1].visits, 2);

        assert_eq!(tree.get(b).visits, 2);
        assert_eq!(tree.get(b).mean_value(), 3.0);
        assert_eq!(tree.get(b).edges[0].visits, 2);
        assert_eq!(tree.get(c).total_reward, 6.0);
    }

    #[test]
    fn test_tree_stats() {
        let (mut tree, a, _, c) = small_tree();
        tree.get_mut(a).state = NodeState::DeadEnd;
        tree.get_mut(c).state = NodeState::Goal;
        tree.backup(c, 1.0);

        let stats = tree.stats();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.goal_count, 1);
        assert_eq!(stats.dead_end_count, 1);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.visited_edges, 2);
        assert_eq!(stats.branching_factor(), 0.75);
    }

    #[test]
    fn test_depth_beyond_u16() {
        let mut tree = SearchTree::new(GridCell::new(0, 0), false);
        let deep = u32::from(u16::MAX) + 5;
        tree.alloc(SearchNode::new(GridCell::new(0, 1), tree.root(), 0, deep));
        assert_eq!(tree.stats().max_depth, deep);
    }
}

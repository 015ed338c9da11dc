//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references. The arena owns
//! every node; children know their parent only through a `NodeId`, so the
//! backpropagation walk is a plain loop over indices.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::PlayerId;

/// Arena-based MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<S, A> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<S, A>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S, A> MCTSTree<S, A> {
    /// Create a new tree with a root node.
    pub fn new(state: S, player: PlayerId) -> Self {
        Self::with_capacity(state, player, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(state: S, player: PlayerId, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(state, player));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode<S, A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a child of `parent` and link it into the parent's child list.
    pub fn add_child(&mut self, parent: NodeId, state: S, action: A, player: PlayerId) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = self.alloc(MCTSNode::child(state, parent, action, player, depth));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S, A> {
        self.get(self.root)
    }

    /// Walk from `id` up to the root, inclusive on both ends.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, S, A> {
        Ancestors {
            tree: self,
            next: id,
        }
    }

    /// Add `reward` to the score of `id` and every ancestor up to the root.
    ///
    /// Visit counts are left alone; selection and expansion own them.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut current = id;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.score += reward;
            current = node.parent;
        }
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let expanded_count = self.nodes.iter().filter(|n| n.is_expanded()).count();
        let total_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            expanded_count,
            total_children,
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S, A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Iterator over a node and its ancestors, ending at the root.
pub struct Ancestors<'a, S, A> {
    tree: &'a MCTSTree<S, A>,
    next: NodeId,
}

impl<'a, S, A> Iterator for Ancestors<'a, S, A> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next.is_none() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).parent;
        Some(current)
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Nodes with at least one child.
    pub expanded_count: usize,

    /// Sum of child-list lengths.
    pub total_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.expanded_count as f64
        }
    }
}

//! MCTS node structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency.
//! A child refers to its parent by index only; the tree arena owns every node.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
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

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<S, A> {
    /// Position this node represents.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Move that produced this node from its parent (None for root).
    pub action: Option<A>,

    /// Player to move from `state`.
    pub player: PlayerId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// One child per legal move once expanded; empty before that or at
    /// terminal positions.
    /// SmallVec optimizes for typical branching factor < 8.
    pub children: SmallVec<[NodeId; 8]>,

    /// Selection passes through this node, plus 1 for children created by
    /// expansion.
    pub visits: u32,

    /// Running sum of backpropagated rewards.
    pub score: f64,
}

impl<S, A> MCTSNode<S, A> {
    /// Create a root node: no parent, no action, zero visits.
    pub fn root(state: S, player: PlayerId) -> Self {
        Self {
            state,
            parent: NodeId::NONE,
            action: None,
            player,
            depth: 0,
            children: SmallVec::new(),
            visits: 0,
            score: 0.0,
        }
    }

    /// Create a child produced by `action`. Children start with one visit.
    pub fn child(state: S, parent: NodeId, action: A, player: PlayerId, depth: u16) -> Self {
        Self {
            state,
            parent,
            action: Some(action),
            player,
            depth,
            children: SmallVec::new(),
            visits: 1,
            score: 0.0,
        }
    }

    /// Check if this node has been expanded.
    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this is the root.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Mean reward, `score / visits`, or 0 before any visit.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }
}

//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler
//! memory management: the `parent` back-reference is a plain index, never
//! an ownership edge, so tearing the tree down is a single release.

use std::collections::VecDeque;
use std::hash::Hash;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the MCTS tree, representing one game state reached by one
/// action from its parent.
///
/// The tree stores no game states; traversal recomputes them by replaying
/// `parent_action` along the descent.
#[derive(Clone, Debug)]
pub struct Node<A: Copy + Eq + Hash> {
    /// Back-reference to the parent node (None for the root).
    pub parent: Option<NodeId>,

    /// Action that led to this node (None for the root).
    pub parent_action: Option<A>,

    /// Children as (action, node id) pairs, one per distinct action
    /// tried from this node, in expansion order.
    pub children: Vec<(A, NodeId)>,

    /// Legal actions not yet expanded into children. Consumed front to
    /// back; once empty (and children non-empty) the node is fully
    /// expanded.
    pub untried_actions: VecDeque<A>,

    /// Number of backpropagation passes through this node.
    pub visits: u32,

    /// Passes that recorded a win for the searching agent.
    /// Invariant: `wins <= visits`.
    pub wins: u32,
}

impl<A: Copy + Eq + Hash> Node<A> {
    /// Create the root node from the legal actions at the search state.
    pub fn root(legal_actions: Vec<A>) -> Self {
        Self::new(None, None, legal_actions)
    }

    /// Create a child node for `action`, seeded with the legal actions
    /// available at the state it leads to.
    pub fn child(parent: NodeId, action: A, legal_actions: Vec<A>) -> Self {
        Self::new(Some(parent), Some(action), legal_actions)
    }

    fn new(parent: Option<NodeId>, parent_action: Option<A>, legal_actions: Vec<A>) -> Self {
        Self {
            parent,
            parent_action,
            children: Vec::new(),
            untried_actions: legal_actions.into(),
            visits: 0,
            wins: 0,
        }
    }

    /// Empirical win rate. Zero for an unvisited node.
    #[allow(dead_code)]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }

    /// Whether every legal action has been expanded into a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }
}

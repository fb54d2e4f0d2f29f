//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality and
//! simpler ownership compared to Rc<RefCell<Node>>: the arena owns every
//! node, parent links are plain indices, and dropping the tree releases
//! the whole search in one go.

use crate::node::{Node, NodeId};
use std::hash::Hash;

/// Arena-allocated MCTS tree, rooted at the current search state.
///
/// Built incrementally across iterations and discarded after the final
/// decision; nothing persists between searches.
#[derive(Debug)]
pub struct Tree<A: Copy + Eq + Hash> {
    nodes: Vec<Node<A>>,
}

impl<A: Copy + Eq + Hash> Tree<A> {
    /// Create a tree whose root holds the given legal actions, all
    /// untried.
    pub fn with_root(legal_actions: Vec<A>) -> Self {
        Self {
            nodes: vec![Node::root(legal_actions)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<A> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<A> {
        &mut self.nodes[id.0]
    }

    /// Materialize a child of `parent` for `action` and register it in
    /// the parent's children, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, action: A, legal_actions: Vec<A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(parent, action, legal_actions));
        self.nodes[parent.0].children.push((action, id));
        id
    }

    /// Get the number of nodes in the tree.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<A> {
        self.get(NodeId::ROOT)
    }

    /// Get a mutable reference to the root node.
    #[allow(dead_code)]
    pub fn root_mut(&mut self) -> &mut Node<A> {
        self.get_mut(NodeId::ROOT)
    }
}

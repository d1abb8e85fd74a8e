//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references, so parent
//! back-links are plain handles and the whole tree is dropped at once when
//! a new search replaces it.

use crate::core::{GameState, MctsError, Result, SearchRng};

use super::node::{MCTSNode, NodeId};
use super::stats::{ChildStats, NodeStats};

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
#[derive(Clone, Debug)]
pub struct MCTSTree<S: GameState> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<S>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S: GameState> MCTSTree<S> {
    /// Create a new tree rooted at `state`.
    pub fn new(state: S, rng: &mut SearchRng) -> Self {
        Self {
            nodes: vec![MCTSNode::root(state, rng)],
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S> {
        self.get(self.root)
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree. Use
    /// [`MCTSTree::try_get`] for handles of unknown origin.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get a node by ID, failing on handles from another tree.
    pub fn try_get(&self, id: NodeId) -> Result<&MCTSNode<S>> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(MctsError::InvalidNode(id))
    }

    /// Mutable variant of [`MCTSTree::try_get`].
    pub fn try_get_mut(&mut self, id: NodeId) -> Result<&mut MCTSNode<S>> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(MctsError::InvalidNode(id))
    }

    /// Allocate a new node, returning its ID.
    fn alloc(&mut self, node: MCTSNode<S>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create the child reached by playing `mv` from `parent_id` and
    /// register it with its parent, keeping the parent's children sorted
    /// by move.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        mv: S::Move,
        state: S,
        rng: &mut SearchRng,
    ) -> NodeId {
        let pos = self
            .get(parent_id)
            .children
            .partition_point(|&c| self.get(c).mv.as_ref() < Some(&mv));
        let child = MCTSNode::child(state, parent_id, self.get(parent_id), mv, rng);
        let child_id = self.alloc(child);
        self.get_mut(parent_id).children.insert(pos, child_id);
        child_id
    }

    /// Child of `id` reached by `mv`, if expanded.
    #[must_use]
    pub fn child_for(&self, id: NodeId, mv: &S::Move) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).mv.as_ref() == Some(mv))
    }

    /// Child of `id` with the strictly highest UCT score.
    ///
    /// Children are scored in move order and ties keep the smallest move,
    /// whatever order they were expanded in. Children that have never
    /// been visited score NaN and are never picked. Returns `None` if
    /// there is no scoreable child.
    #[must_use]
    pub fn find_best_child(&self, id: NodeId, exploration_bias: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for &child_id in &node.children {
            let score = node.calc_score(self.get(child_id), exploration_bias);
            if score > best_score {
                best = Some(child_id);
                best_score = score;
            }
        }

        best
    }

    /// Snapshot of the subtree at `id`, `depth` levels deep.
    ///
    /// Children are listed by descending visit count; below `depth` they
    /// are replaced by [`ChildStats::Truncated`].
    #[must_use]
    pub fn get_stats(&self, id: NodeId, depth: usize) -> NodeStats<S::Move, S::Team> {
        let node = self.get(id);

        let children = if depth > 0 {
            let mut children: Vec<_> = node
                .children
                .iter()
                .map(|&child| self.get_stats(child, depth - 1))
                .collect();
            children.sort_by(|a, b| b.visits.cmp(&a.visits));
            ChildStats::Expanded(children)
        } else {
            ChildStats::Truncated
        };

        NodeStats {
            mv: node.mv.clone(),
            state: node.state.describe(),
            visits: node.visits,
            rewards: node.rewards.clone(),
            children,
        }
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

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal).count(),
            fully_expanded_count: self.nodes.iter().filter(|n| n.is_fully_expanded).count(),
            internal_count: self.nodes.iter().filter(|n| !n.children.is_empty()).count(),
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u32,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Number of nodes with no untried moves left.
    pub fully_expanded_count: usize,

    /// Number of nodes with at least one child.
    pub internal_count: usize,
}

impl TreeStats {
    /// Average number of expanded children per internal node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.internal_count == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / self.internal_count as f64
        }
    }
}

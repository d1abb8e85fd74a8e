//! MCTS node structure.
//!
//! Nodes live in the `MCTSTree` arena and refer to each other through
//! `NodeId` indices: a parent owns its children's handles, a child keeps
//! its parent's handle as a plain back-reference.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameState, SearchRng, TeamRewards};

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
#[derive(Clone, Debug)]
pub struct MCTSNode<S: GameState> {
    /// The position this node represents.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Team to move at the parent, i.e. the team that chose `mv`.
    pub parent_team: Option<S::Team>,

    /// Move that led here from the parent (None for root).
    pub mv: Option<S::Move>,

    /// Expanded children, ordered by move.
    pub children: SmallVec<[NodeId; 8]>,

    /// Simulations that passed through this node.
    pub visits: u32,

    /// Cumulative reward per team.
    pub rewards: TeamRewards<S::Team>,

    /// Untried moves, shuffled once at construction. Expansion pops from
    /// the back.
    pub remaining_moves: Vec<S::Move>,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Terminal, or no untried moves left.
    pub is_fully_expanded: bool,

    /// Team to move at this node.
    pub team: S::Team,

    /// Depth in tree (root = 0).
    pub depth: u32,
}

impl<S: GameState> MCTSNode<S> {
    fn new(
        state: S,
        parent: NodeId,
        parent_team: Option<S::Team>,
        mv: Option<S::Move>,
        depth: u32,
        rng: &mut SearchRng,
    ) -> Self {
        let is_terminal = state.is_terminal();
        let remaining_moves = if is_terminal {
            Vec::new()
        } else {
            let mut moves = state.legal_moves();
            rng.shuffle(&mut moves);
            moves
        };

        let mut rewards = TeamRewards::new();
        if let Some(team) = &parent_team {
            rewards.seed(team.clone());
        }

        Self {
            team: state.current_team(),
            state,
            parent,
            parent_team,
            mv,
            children: SmallVec::new(),
            visits: 0,
            rewards,
            is_fully_expanded: is_terminal || remaining_moves.is_empty(),
            remaining_moves,
            is_terminal,
            depth,
        }
    }

    /// Create a root node.
    pub fn root(state: S, rng: &mut SearchRng) -> Self {
        Self::new(state, NodeId::NONE, None, None, 0, rng)
    }

    /// Create the node reached from `parent` by playing `mv`.
    pub fn child(
        state: S,
        parent_id: NodeId,
        parent: &MCTSNode<S>,
        mv: S::Move,
        rng: &mut SearchRng,
    ) -> Self {
        Self::new(
            state,
            parent_id,
            Some(parent.team.clone()),
            Some(mv),
            parent.depth + 1,
            rng,
        )
    }

    /// Parent handle, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        if self.parent.is_none() {
            None
        } else {
            Some(self.parent)
        }
    }

    /// Check if this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Record one simulation through this node.
    pub fn visit(&mut self, rewards: &TeamRewards<S::Team>) {
        self.visits += 1;
        self.rewards.merge(rewards);
    }

    /// Signed average reward from the point of view of the team that
    /// chose this node.
    ///
    /// `(2 * parent_team_reward - total_reward) / visits`: the parent
    /// team's own reward minus the combined reward of every other team.
    /// Meaningless before the first visit.
    #[must_use]
    pub fn avg_reward(&self) -> f64 {
        let own = self
            .parent_team
            .as_ref()
            .map_or(0.0, |team| self.rewards.get(team));
        (2.0 * own - self.rewards.total()) / f64::from(self.visits)
    }

    /// UCT score of `child` seen from this node.
    ///
    /// `avg + c * sqrt(ln(N) / n)` with N this node's visits and n the
    /// child's. The exploration term is dropped while N is 0.
    #[must_use]
    pub fn calc_score(&self, child: &MCTSNode<S>, exploration_bias: f64) -> f64 {
        let exploration = if self.visits == 0 {
            0.0
        } else {
            let ln_parent = f64::from(self.visits).ln();
            exploration_bias * (ln_parent / f64::from(child.visits)).sqrt()
        };
        child.avg_reward() + exploration
    }
}

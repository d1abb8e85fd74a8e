//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

use crate::core::TeamRewards;

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations (rounds) performed.
    pub iterations: u32,

    /// Nodes expanded (added to tree).
    pub nodes_expanded: u32,

    /// Simulations (rollouts) performed.
    pub simulations: u32,

    /// Maximum depth reached during search.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

/// Read-only snapshot of a subtree, produced by `MCTSTree::get_stats`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStats<M, T: Eq + Hash> {
    /// Move that led to this node.
    #[serde(rename = "move")]
    pub mv: Option<M>,

    /// `GameState::describe` of the node's state.
    pub state: String,

    pub visits: u32,

    pub rewards: TeamRewards<T>,

    pub children: ChildStats<M, T>,
}

/// Children of a [`NodeStats`] snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChildStats<M, T: Eq + Hash> {
    /// Below the requested depth.
    Truncated,
    /// Sorted by descending visit count.
    Expanded(Vec<NodeStats<M, T>>),
}

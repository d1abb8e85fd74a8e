//! # multimcts
//!
//! A generic Monte Carlo Tree Search engine for sequential games with any
//! number of teams.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The search only talks to the `GameState` trait.
//!    No heuristics are required; rollouts default to uniform random play.
//!
//! 2. **N-Team First**: Rewards are tracked per team, not as a single
//!    zero-sum scalar, so non-zero-sum and many-team games work unchanged.
//!
//! 3. **Reproducible**: Every random draw comes from a seeded `SearchRng`.
//!
//! ## Modules
//!
//! - `core`: Game-state trait, team rewards, RNG, errors
//! - `mcts`: Tree, nodes, search loop, statistics
//! - `games`: Reference games (tic-tac-toe)

pub mod core;
pub mod mcts;
pub mod games;

// Re-export commonly used types
pub use crate::core::{GameState, MctsError, Reward, SearchRng, TeamRewards};

pub use crate::mcts::{
    ChildStats, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId, NodeStats,
    Rollout, SearchStats, SimulationPolicy, TreeStats,
};

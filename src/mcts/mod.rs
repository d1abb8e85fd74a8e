//! Monte Carlo Tree Search for multi-team games.
//!
//! ## Overview
//!
//! - **Multi-team rewards**: every node keeps a reward per team, and a
//!   child is scored from the point of view of the team that chose it.
//! - **Arena tree**: nodes live in one `Vec` and link through `NodeId`.
//! - **Deterministic**: all randomness flows from the configured seed.
//! - **Pluggable rollouts**: swap the `SimulationPolicy`, or let the game
//!   steer rollouts through `GameState::suggest_move`.
//!
//! ## Usage
//!
//! ```rust
//! use multimcts::core::GameState;
//! use multimcts::games::tictactoe::TicTacToe;
//! use multimcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! let state: TicTacToe = "X : XX_/OO_/___".parse().unwrap();
//! let mut search = MCTSSearch::new(MCTSConfig::default());
//!
//! let mv = search.search(state.clone(), Some(500), None).unwrap();
//! assert!(state.make_move(&mv).is_terminal());
//!
//! for (mv, visits) in search.child_visits() {
//!     println!("{mv}: {visits}");
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{Rollout, SimulationPolicy};
pub use search::MCTSSearch;
pub use stats::{ChildStats, NodeStats, SearchStats};
pub use tree::{MCTSTree, TreeStats};

//! Core types: the game-state capability, team rewards, RNG, errors.
//!
//! Nothing in here knows about trees; the `mcts` module builds on top.

pub mod error;
pub mod rng;
pub mod state;
pub mod team;

pub use error::{MctsError, Result};
pub use rng::SearchRng;
pub use state::GameState;
pub use team::{Reward, TeamRewards};

//! The game-state capability consumed by the search.
//!
//! The engine never inspects a game directly. Everything it needs is
//! expressed through [`GameState`]: whose turn it is, which moves exist,
//! how a move transforms the state, and what a finished game is worth.

use std::fmt::Debug;
use std::hash::Hash;

use super::team::Reward;

/// A position in a sequential, perfect-information game.
///
/// Implementations must be immutable per step: [`make_move`] returns a new
/// state and leaves the receiver untouched.
///
/// [`make_move`]: GameState::make_move
pub trait GameState: Debug + Sized {
    /// Identifier of a participating team.
    type Team: Clone + Eq + Hash + Debug;

    /// Identifier of a move.
    ///
    /// The ordering fixes the order children are scored in, so ties
    /// between equally good moves go to the smallest one.
    type Move: Clone + Ord + Hash + Debug;

    /// The team whose turn it is.
    fn current_team(&self) -> Self::Team;

    /// All legal moves. Only empty on terminal states.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The state reached by playing `mv`.
    ///
    /// Behavior for an illegal move is up to the implementation.
    fn make_move(&self, mv: &Self::Move) -> Self;

    /// Whether the game has ended.
    fn is_terminal(&self) -> bool;

    /// Reward of a terminal state.
    ///
    /// `terminal_team` is the team that played the game-ending move; a
    /// [`Reward::Scalar`] is credited to it. Only called on terminal states.
    fn reward(&self, terminal_team: &Self::Team) -> Reward<Self::Team>;

    /// Rollout policy hook.
    ///
    /// Return `None` to let the search pick a uniformly random legal move.
    /// Only called on non-terminal states.
    fn suggest_move(&self) -> Option<Self::Move> {
        None
    }

    /// Human-readable rendering used in statistics snapshots.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

//! Simulation (rollout) policies.
//!
//! A `SimulationPolicy` plays a game out from a leaf and reports the
//! per-team outcome. The default [`Rollout`] follows the state's own
//! `suggest_move` and falls back to uniformly random legal moves.

use crate::core::{GameState, MctsError, Result, SearchRng, TeamRewards};

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<S: GameState> {
    /// Play out from `state` and return rewards per team.
    ///
    /// `terminal_team` is the team that produced `state`; it is the team
    /// credited with a scalar reward if `state` is already terminal.
    fn simulate(
        &self,
        state: &S,
        terminal_team: S::Team,
        rng: &mut SearchRng,
    ) -> Result<TeamRewards<S::Team>>;
}

/// Rollout to the end of the game.
///
/// Uses `GameState::suggest_move` when it returns a move, otherwise a
/// uniformly random legal move.
#[derive(Clone, Debug, Default)]
pub struct Rollout;

impl<S: GameState> SimulationPolicy<S> for Rollout {
    fn simulate(
        &self,
        state: &S,
        mut terminal_team: S::Team,
        rng: &mut SearchRng,
    ) -> Result<TeamRewards<S::Team>> {
        let mut owned: Option<S> = None;

        loop {
            let current = owned.as_ref().unwrap_or(state);

            if current.is_terminal() {
                let reward = current.reward(&terminal_team);
                return Ok(reward.into_team_rewards(terminal_team));
            }

            let mv = match current.suggest_move() {
                Some(mv) => mv,
                None => {
                    let moves = current.legal_moves();
                    rng.choose(&moves).cloned().ok_or(MctsError::NoLegalMoves)?
                }
            };

            terminal_team = current.current_team();
            owned = Some(current.make_move(&mv));
        }
    }
}

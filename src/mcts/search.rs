//! Core MCTS search algorithm.
//!
//! Each round runs the four classic phases over the arena tree:
//! selection and expansion (`select`/`expand`), a rollout (`simulate`) and
//! `backpropagate`. The phases are public so callers can drive or inspect
//! a search one step at a time.

use std::time::{Duration, Instant};

use crate::core::{GameState, MctsError, Result, SearchRng, TeamRewards};

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{Rollout, SimulationPolicy};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the game state type. Owns the configuration, the RNG and
/// the tree of the most recent search.
pub struct MCTSSearch<S: GameState> {
    /// Search configuration.
    config: MCTSConfig,

    /// Tree of the most recent search (None before the first one).
    tree: Option<MCTSTree<S>>,

    /// RNG for move shuffling and simulations.
    rng: SearchRng,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<S>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<S: GameState> MCTSSearch<S> {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            rng: SearchRng::new(config.seed),
            config,
            tree: None,
            simulation: Box::new(Rollout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<P: SimulationPolicy<S> + 'static>(mut self, simulation: P) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: SearchRng) -> Self {
        self.rng = rng;
        self
    }

    /// Discard the previous tree and plant a fresh root at `state`.
    pub fn start(&mut self, state: S) -> NodeId {
        self.stats.reset();
        let tree = MCTSTree::new(state, &mut self.rng);
        let root = tree.root();
        self.tree = Some(tree);
        root
    }

    /// Search from `state` and return the best move.
    ///
    /// Rounds run until `max_iterations` rounds are done or `max_time` has
    /// elapsed, whichever comes first. Budgets are checked after each
    /// round, so at least one round always runs; with neither budget the
    /// search never stops.
    ///
    /// Fails with [`MctsError::NoMoves`] when `state` is terminal.
    pub fn search(
        &mut self,
        state: S,
        max_iterations: Option<u32>,
        max_time: Option<Duration>,
    ) -> Result<S::Move> {
        let start = Instant::now();
        let root = self.start(state);

        loop {
            self.execute_round(root)?;
            self.stats.iterations += 1;

            if max_iterations.is_some_and(|max| self.stats.iterations >= max) {
                break;
            }
            if max_time.is_some_and(|limit| start.elapsed() >= limit) {
                break;
            }
        }

        // Record time
        self.stats.time_us = start.elapsed().as_micros() as u64;

        self.best_move()
    }

    /// Search from `state` using the budgets in the configuration.
    pub fn search_with_budget(&mut self, state: S) -> Result<S::Move> {
        let max_iterations = self.config.max_iterations;
        let max_time = self.config.max_time();
        self.search(state, max_iterations, max_time)
    }

    /// One round: select a leaf below `node`, simulate from it and
    /// backpropagate the outcome. Grows the tree by at most one node.
    pub fn execute_round(&mut self, node: NodeId) -> Result<()> {
        let leaf = self.select(node)?;
        let rewards = self.simulate(leaf)?;
        self.backpropagate(leaf, &rewards)
    }

    /// Descend from `node` to a freshly expanded child or a terminal node.
    pub fn select(&mut self, node: NodeId) -> Result<NodeId> {
        let mut current = node;

        loop {
            let tree = self.tree.as_ref().ok_or(MctsError::NoTree)?;
            let candidate = tree.try_get(current)?;

            if candidate.is_terminal {
                return Ok(current);
            }
            if !candidate.is_fully_expanded {
                return self.expand(current);
            }

            // No child here means a non-terminal state offered no moves
            current = tree
                .find_best_child(current, self.config.exploration_bias)
                .ok_or(MctsError::NoLegalMoves)?;
        }
    }

    /// Expand one untried move of `node` and return the new child.
    pub fn expand(&mut self, node: NodeId) -> Result<NodeId> {
        let tree = self.tree.as_mut().ok_or(MctsError::NoTree)?;
        let parent = tree.try_get_mut(node)?;

        let mv = parent.remaining_moves.pop().ok_or(MctsError::NoMoves)?;
        if parent.remaining_moves.is_empty() {
            parent.is_fully_expanded = true;
        }
        let child_state = parent.state.make_move(&mv);

        let child = tree.add_child(node, mv, child_state, &mut self.rng);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(tree.get(child).depth);

        Ok(child)
    }

    /// Play a game out from `node` and return the rewards per team.
    ///
    /// The team credited with a scalar reward is the one that made the
    /// last move; for a terminal `node` that is its parent's team (or the
    /// node's own team at the root).
    pub fn simulate(&mut self, node: NodeId) -> Result<TeamRewards<S::Team>> {
        let tree = self.tree.as_ref().ok_or(MctsError::NoTree)?;
        let leaf = tree.try_get(node)?;

        let terminal_team = leaf
            .parent_team
            .clone()
            .unwrap_or_else(|| leaf.team.clone());

        let mut sim_rng = self.rng.fork();
        let rewards = self
            .simulation
            .simulate(&leaf.state, terminal_team, &mut sim_rng)?;

        self.stats.simulations += 1;
        Ok(rewards)
    }

    /// Credit `rewards` to `node` and each of its ancestors.
    pub fn backpropagate(&mut self, node: NodeId, rewards: &TeamRewards<S::Team>) -> Result<()> {
        let tree = self.tree.as_mut().ok_or(MctsError::NoTree)?;
        tree.try_get(node)?;

        let mut current = node;
        while !current.is_none() {
            let visited = tree.get_mut(current);
            visited.visit(rewards);
            current = visited.parent;
        }

        Ok(())
    }

    /// Move of the root child with the best score at zero exploration.
    ///
    /// This is the highest average reward, not the most visited child.
    pub fn best_move(&self) -> Result<S::Move> {
        let tree = self.tree.as_ref().ok_or(MctsError::NoTree)?;
        let best = tree
            .find_best_child(tree.root(), 0.0)
            .ok_or(MctsError::NoMoves)?;
        tree.get(best).mv.clone().ok_or(MctsError::NoMoves)
    }

    /// Root moves and their visit counts.
    pub fn child_visits(&self) -> Vec<(S::Move, u32)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };

        tree.root_node()
            .children
            .iter()
            .filter_map(|&child| {
                let node = tree.get(child);
                node.mv.clone().map(|mv| (mv, node.visits))
            })
            .collect()
    }

    /// Root of the most recent search.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.tree.as_ref().map(MCTSTree::root)
    }

    /// Get the search tree of the most recent search.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree<S>> {
        self.tree.as_ref()
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

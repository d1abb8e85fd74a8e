//! MCTS integration tests using tic-tac-toe.

use std::cell::Cell;
use std::rc::Rc;

use multimcts::core::{GameState, MctsError, Result, Reward, SearchRng, TeamRewards};
use multimcts::games::tictactoe::{Mark, TicTacToe};
use multimcts::mcts::{ChildStats, MCTSConfig, MCTSSearch, SimulationPolicy};

fn state(s: &str) -> TicTacToe {
    s.parse().unwrap()
}

// =============================================================================
// Move Quality Tests
// =============================================================================

#[test]
fn test_takes_winning_move() {
    let mut search = MCTSSearch::new(MCTSConfig::default());
    let start = state("X : XX_/___/___");
    assert!(!start.is_terminal());

    let next = start.make_move(&search.search(start.clone(), Some(1000), None).unwrap());

    assert_eq!(next.to_string(), "O : XXX/___/___");
    assert!(next.is_terminal());
    assert_eq!(next.reward(&Mark::X), Reward::Scalar(1.0));
}

#[test]
fn test_blocks_opponent_win() {
    let mut search = MCTSSearch::new(MCTSConfig::default());
    let start = state("O : XX_/___/___");

    let next = start.make_move(&search.search(start.clone(), Some(1000), None).unwrap());

    assert_eq!(next.to_string(), "X : XXO/___/___");
    assert!(!next.is_terminal());
}

#[test]
fn test_winning_move_across_seeds() {
    for seed in [1, 7, 99, 2024] {
        let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(seed));
        let start = state("O : XX_/OO_/X__");

        let mv = search.search(start.clone(), Some(1000), None).unwrap();

        assert_eq!(mv, 5, "seed {seed} missed the win");
    }
}

#[test]
fn test_immediate_win_beats_double_threats_across_seeds() {
    // Moves 4 and 6 set up two threats at once and also average 1.0;
    // the immediate win must still be chosen whatever the expansion order.
    let start = state("X : XX_/___/___");

    for seed in 0..20 {
        let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(seed));

        let next = start.make_move(&search.search(start.clone(), Some(1000), None).unwrap());

        assert!(next.is_terminal(), "seed {seed} played {next}");
        assert_eq!(next.reward(&Mark::X), Reward::Scalar(1.0));
    }
}

// =============================================================================
// Reward Form Tests
// =============================================================================

/// Tic-tac-toe that reports its reward as an explicit per-team mapping.
#[derive(Clone, Debug)]
struct MappedTicTacToe(TicTacToe);

impl GameState for MappedTicTacToe {
    type Team = Mark;
    type Move = usize;

    fn current_team(&self) -> Mark {
        self.0.current_team()
    }

    fn legal_moves(&self) -> Vec<usize> {
        self.0.legal_moves()
    }

    fn make_move(&self, mv: &usize) -> Self {
        Self(self.0.make_move(mv))
    }

    fn is_terminal(&self) -> bool {
        self.0.is_terminal()
    }

    fn reward(&self, terminal_team: &Mark) -> Reward<Mark> {
        match self.0.reward(terminal_team) {
            Reward::Scalar(value) => Reward::Teams(TeamRewards::single(*terminal_team, value)),
            teams => teams,
        }
    }
}

#[test]
fn test_scalar_and_mapping_rewards_agree() {
    for (seed, board) in [(3, "X : ___/___/___"), (11, "O : X__/_O_/__X"), (42, "X : XO_/_O_/___")] {
        let config = MCTSConfig::default().with_seed(seed);
        let mut scalar = MCTSSearch::new(config.clone());
        let mut mapped = MCTSSearch::new(config);

        let scalar_move = scalar.search(state(board), Some(400), None).unwrap();
        let mapped_move = mapped
            .search(MappedTicTacToe(state(board)), Some(400), None)
            .unwrap();

        assert_eq!(scalar_move, mapped_move);
        assert_eq!(scalar.child_visits(), mapped.child_visits());
    }
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_terminal_root_is_an_error() {
    let mut search = MCTSSearch::new(MCTSConfig::default());

    let result = search.search(state("X : OXO/XXO/XOX"), Some(5), None);

    assert_eq!(result, Err(MctsError::NoMoves));
    assert!(search.tree().unwrap().root_node().children.is_empty());
}

// =============================================================================
// Policy Tests
// =============================================================================

/// Credits every rollout to X and counts calls.
struct CountingPolicy {
    calls: Rc<Cell<u32>>,
}

impl SimulationPolicy<TicTacToe> for CountingPolicy {
    fn simulate(
        &self,
        _state: &TicTacToe,
        _terminal_team: Mark,
        _rng: &mut SearchRng,
    ) -> Result<TeamRewards<Mark>> {
        self.calls.set(self.calls.get() + 1);
        Ok(TeamRewards::single(Mark::X, 1.0))
    }
}

#[test]
fn test_custom_simulation_policy() {
    let calls = Rc::new(Cell::new(0));
    let mut search = MCTSSearch::new(MCTSConfig::default())
        .with_simulation(CountingPolicy { calls: Rc::clone(&calls) });

    search.search(TicTacToe::new(), Some(120), None).unwrap();

    assert_eq!(calls.get(), 120);
    assert_eq!(search.stats().simulations, 120);

    let tree = search.tree().unwrap();
    assert_eq!(tree.root_node().rewards.get(&Mark::X), 120.0);
}

/// Tic-tac-toe whose rollouts always fill the lowest free cell.
#[derive(Clone, Debug)]
struct ScriptedTicTacToe(TicTacToe);

impl GameState for ScriptedTicTacToe {
    type Team = Mark;
    type Move = usize;

    fn current_team(&self) -> Mark {
        self.0.current_team()
    }

    fn legal_moves(&self) -> Vec<usize> {
        self.0.legal_moves()
    }

    fn make_move(&self, mv: &usize) -> Self {
        Self(self.0.make_move(mv))
    }

    fn is_terminal(&self) -> bool {
        self.0.is_terminal()
    }

    fn reward(&self, terminal_team: &Mark) -> Reward<Mark> {
        self.0.reward(terminal_team)
    }

    fn suggest_move(&self) -> Option<usize> {
        self.0.legal_moves().first().copied()
    }

    fn describe(&self) -> String {
        self.0.describe()
    }
}

#[test]
fn test_suggested_rollouts_are_seed_independent() {
    // With scripted rollouts the only randomness left is expansion order,
    // so each root child's statistics must not depend on the seed.
    let start = ScriptedTicTacToe(state("X : XO_/___/___"));
    let mut per_seed = Vec::new();

    for seed in [5, 6] {
        let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(seed));
        search.search(start.clone(), Some(7), None).unwrap();

        let tree = search.tree().unwrap();
        let mut children: Vec<_> = tree
            .root_node()
            .children
            .iter()
            .map(|&id| {
                let node = tree.get(id);
                (node.mv, node.rewards.get(&Mark::X), node.rewards.get(&Mark::O))
            })
            .collect();
        children.sort_by_key(|c| c.0);
        per_seed.push(children);
    }

    assert_eq!(per_seed[0], per_seed[1]);
}

// =============================================================================
// Inspection Tests
// =============================================================================

#[test]
fn test_stats_snapshot_after_search() {
    let mut search = MCTSSearch::new(MCTSConfig::default());
    search.search(TicTacToe::new(), Some(200), None).unwrap();

    let tree = search.tree().unwrap();
    let stats = tree.get_stats(tree.root(), 2);

    assert_eq!(stats.mv, None);
    assert_eq!(stats.visits, 200);
    assert_eq!(stats.state, "X : ___/___/___");

    let ChildStats::Expanded(children) = &stats.children else {
        panic!("root children should be expanded");
    };
    assert_eq!(children.len(), 9);
    assert!(children.windows(2).all(|w| w[0].visits >= w[1].visits));
    for child in children {
        assert!(matches!(child.children, ChildStats::Expanded(_)));
    }

    assert_eq!(stats, tree.get_stats(tree.root(), 2));
}

#[test]
fn test_tree_stats_after_search() {
    let mut search = MCTSSearch::new(MCTSConfig::default());
    search.search(TicTacToe::new(), Some(300), None).unwrap();

    let tree_stats = search.tree().unwrap().stats();
    let search_stats = search.stats();

    // Every round but those ending on a known terminal node adds a node
    assert_eq!(tree_stats.node_count as u32, search_stats.nodes_expanded + 1);
    assert!(tree_stats.node_count <= 301);
    assert!(tree_stats.max_depth >= 2);
    assert_eq!(tree_stats.max_depth, search_stats.max_depth);
    assert_eq!(search_stats.iterations, 300);
    assert_eq!(search_stats.simulations, 300);
}

#[test]
fn test_stats_serialize_to_json() {
    let mut search = MCTSSearch::new(MCTSConfig::default());
    search.search(state("X : XX_/OO_/___"), Some(50), None).unwrap();

    let tree = search.tree().unwrap();
    let json = serde_json::to_value(tree.get_stats(tree.root(), 1)).unwrap();

    assert_eq!(json["state"], "X : XX_/OO_/___");
    assert_eq!(json["visits"], 50);
    assert!(json["children"]["Expanded"].is_array());
}

// =============================================================================
// Deep Tree Tests
// =============================================================================

/// Single-team game with exactly one legal move until `left` runs out.
#[derive(Clone, Debug)]
struct Chain {
    left: u32,
}

impl GameState for Chain {
    type Team = u8;
    type Move = u32;

    fn current_team(&self) -> u8 {
        0
    }

    fn legal_moves(&self) -> Vec<u32> {
        if self.left == 0 {
            Vec::new()
        } else {
            vec![self.left]
        }
    }

    fn make_move(&self, _mv: &u32) -> Self {
        Self { left: self.left - 1 }
    }

    fn is_terminal(&self) -> bool {
        self.left == 0
    }

    fn reward(&self, _terminal_team: &u8) -> Reward<u8> {
        Reward::Scalar(1.0)
    }
}

#[test]
fn test_depth_beyond_u16_range() {
    let depth = 70_000;
    let mut search = MCTSSearch::new(MCTSConfig::default());
    let mut node = search.start(Chain { left: depth });

    for _ in 0..depth {
        node = search.expand(node).unwrap();
    }

    let tree = search.tree().unwrap();
    assert!(tree.get(node).is_terminal);
    assert_eq!(tree.get(node).depth, depth);
    assert_eq!(tree.stats().max_depth, depth);
    assert_eq!(search.stats().max_depth, depth);
}

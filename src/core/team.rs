//! Per-team reward accounting.
//!
//! ## TeamRewards
//!
//! A sparse mapping from team identifier to cumulative reward. Unlike a
//! fixed-size per-player table, teams appear lazily as they are first
//! credited, so the same type serves two-player, N-team and non-zero-sum
//! games. Missing teams read as `0.0`.
//!
//! ## Reward
//!
//! What a terminal game state reports: either a bare scalar for the team
//! that made the game-ending move, or an explicit per-team mapping.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Cumulative reward per team.
///
/// ## Example
///
/// ```
/// use multimcts::core::TeamRewards;
///
/// let mut rewards: TeamRewards<&str> = TeamRewards::single("X", 1.0);
/// rewards.add("O", -1.0);
///
/// assert_eq!(rewards.get(&"X"), 1.0);
/// assert_eq!(rewards.get(&"O"), -1.0);
/// assert_eq!(rewards.get(&"Z"), 0.0);
/// assert_eq!(rewards.total(), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRewards<T: Eq + Hash> {
    data: FxHashMap<T, f64>,
}

impl<T: Eq + Hash> Default for TeamRewards<T> {
    fn default() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }
}

impl<T: Eq + Hash> TeamRewards<T> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping crediting a single team.
    #[must_use]
    pub fn single(team: T, reward: f64) -> Self {
        let mut rewards = Self::new();
        rewards.add(team, reward);
        rewards
    }

    /// Reward credited to a team (0.0 if never credited).
    #[must_use]
    pub fn get(&self, team: &T) -> f64 {
        self.data.get(team).copied().unwrap_or(0.0)
    }

    /// Whether the team has an entry, even a zero one.
    #[must_use]
    pub fn contains(&self, team: &T) -> bool {
        self.data.contains_key(team)
    }

    /// Insert a zero entry for the team if it has none.
    pub fn seed(&mut self, team: T) {
        self.data.entry(team).or_insert(0.0);
    }

    /// Add `delta` to a team's reward, creating the entry if needed.
    pub fn add(&mut self, team: T, delta: f64) {
        *self.data.entry(team).or_insert(0.0) += delta;
    }

    /// Add every entry of `other` into this mapping.
    pub fn merge(&mut self, other: &Self)
    where
        T: Clone,
    {
        for (team, &delta) in other.iter() {
            self.add(team.clone(), delta);
        }
    }

    /// Sum of the rewards of all teams.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.values().sum()
    }

    /// Iterate over (team, reward) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &f64)> {
        self.data.iter()
    }

    /// Number of teams with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if no team has been credited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Eq + Hash> FromIterator<(T, f64)> for TeamRewards<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut rewards = Self::new();
        for (team, reward) in iter {
            rewards.add(team, reward);
        }
        rewards
    }
}

/// Reward reported by a terminal game state.
#[derive(Clone, Debug, PartialEq)]
pub enum Reward<T: Eq + Hash> {
    /// Reward for the team that played the game-ending move.
    Scalar(f64),
    /// Explicit reward per team.
    Teams(TeamRewards<T>),
}

impl<T: Eq + Hash> Reward<T> {
    /// Normalize into a per-team mapping.
    ///
    /// A scalar is credited to `terminal_team`.
    #[must_use]
    pub fn into_team_rewards(self, terminal_team: T) -> TeamRewards<T> {
        match self {
            Reward::Scalar(value) => TeamRewards::single(terminal_team, value),
            Reward::Teams(rewards) => rewards,
        }
    }
}

impl<T: Eq + Hash> From<f64> for Reward<T> {
    fn from(value: f64) -> Self {
        Reward::Scalar(value)
    }
}

impl<T: Eq + Hash> From<TeamRewards<T>> for Reward<T> {
    fn from(rewards: TeamRewards<T>) -> Self {
        Reward::Teams(rewards)
    }
}

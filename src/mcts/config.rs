//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// MCTS configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCT exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_bias: f64,

    /// Random seed for move shuffling and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Iteration budget used by `search_with_budget`.
    pub max_iterations: Option<u32>,

    /// Wall-clock budget in milliseconds used by `search_with_budget`.
    pub max_time_ms: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_bias: std::f64::consts::SQRT_2,
            seed: 42,
            max_iterations: Some(1000),
            max_time_ms: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_bias = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom iteration budget.
    pub fn with_max_iterations(mut self, iterations: Option<u32>) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Create a new config with a custom time budget.
    pub fn with_max_time(mut self, time: Option<Duration>) -> Self {
        self.max_time_ms = time.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The time budget as a `Duration`.
    #[must_use]
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert!((config.exploration_bias - 1.414).abs() < 0.001);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_iterations, Some(1000));
        assert_eq!(config.max_time(), None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_max_iterations(None)
            .with_max_time(Some(Duration::from_millis(250)));

        assert_eq!(config.exploration_bias, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_iterations, None);
        assert_eq!(config.max_time(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_huge_time_budget_saturates() {
        let config = MCTSConfig::default().with_max_time(Some(Duration::MAX));
        assert_eq!(config.max_time_ms, Some(u64::MAX));
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_max_time(Some(Duration::from_secs(1)));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.seed, deserialized.seed);
        assert_eq!(deserialized.max_time_ms, Some(1000));
    }
}

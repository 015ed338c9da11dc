//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default UCB exploration constant, 10 * sqrt(2).
pub const DEFAULT_EXPLORATION: f64 = 10.0 * std::f64::consts::SQRT_2;

/// MCTS configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Search iterations per move decision.
    pub playout_budget: u32,

    /// UCB exploration constant (default: 10 * sqrt(2) = 14.14).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Probability that selection takes a uniformly random child instead
    /// of the best one.
    pub random_child_probability: f64,

    /// Levels the warm-up descends, expanding each frontier node on the way,
    /// before the main loop starts.
    pub warmup_depth: u32,

    /// Maximum nodes to allocate in the tree.
    /// Prevents memory exhaustion on large searches.
    pub max_nodes: usize,

    /// Wall-clock limit for the iteration loop, in milliseconds.
    /// `None` runs the full budget.
    pub time_limit_ms: Option<u64>,

    /// Random seed. Same seed produces deterministic searches;
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            playout_budget: 200,
            exploration_constant: DEFAULT_EXPLORATION,
            random_child_probability: 0.25,
            warmup_depth: 3,
            max_nodes: 1_000_000,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with a custom playout budget.
    pub fn with_budget(mut self, playouts: u32) -> Self {
        self.playout_budget = playouts;
        self
    }

    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom random-child probability.
    pub fn with_random_child_probability(mut self, epsilon: f64) -> Self {
        self.random_child_probability = epsilon;
        self
    }

    /// Create a new config with a custom warm-up depth.
    pub fn with_warmup_depth(mut self, depth: u32) -> Self {
        self.warmup_depth = depth;
        self
    }

    /// Create a new config with a wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(Error::InvalidConfig {
                field: "exploration_constant",
                value: self.exploration_constant.to_string(),
                reason: "must be finite and non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.random_child_probability) {
            return Err(Error::InvalidConfig {
                field: "random_child_probability",
                value: self.random_child_probability.to_string(),
                reason: "must be in [0, 1]",
            });
        }
        if self.warmup_depth == 0 {
            return Err(Error::InvalidConfig {
                field: "warmup_depth",
                value: self.warmup_depth.to_string(),
                reason: "must be at least 1 so the root is expanded",
            });
        }
        if self.max_nodes == 0 {
            return Err(Error::InvalidConfig {
                field: "max_nodes",
                value: self.max_nodes.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

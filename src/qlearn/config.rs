//! Q-learning hyperparameters and the move reward schedule.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules::ActionSignal;

/// Immediate rewards for each kind of move a game reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Move placed next to one of the mover's own pieces.
    pub own_marker: f64,
    /// Move placed on an empty neighbourhood.
    pub empty: f64,
    /// Move placed next to an opponent piece.
    pub opponent_marker: f64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            own_marker: 10.0,
            empty: -1.0,
            opponent_marker: -50.0,
        }
    }
}

impl RewardSchedule {
    /// Reward for `signal`, or `None` when the move should not be learned from.
    #[must_use]
    pub fn reward(&self, signal: ActionSignal) -> Option<f64> {
        match signal {
            ActionSignal::OwnMarker => Some(self.own_marker),
            ActionSignal::Empty => Some(self.empty),
            ActionSignal::OpponentMarker => Some(self.opponent_marker),
            ActionSignal::Skip => None,
        }
    }
}

/// Q-learning configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Learning rate. Each update is scaled by `alpha / N(s, a)`.
    pub alpha: f64,

    /// Discount applied to the bootstrapped maximum.
    pub gamma: f64,

    /// Probability of a uniformly random move in `best_move`.
    pub epsilon: f64,

    /// Random seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Rewards used by learning runs.
    pub rewards: RewardSchedule,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.1,
            seed: None,
            rewards: RewardSchedule::default(),
        }
    }
}

impl QLearningConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, bool, &'static str); 3] = [
            ("alpha", self.alpha, self.alpha > 0.0 && self.alpha <= 1.0, "must be in (0, 1]"),
            ("gamma", self.gamma, (0.0..=1.0).contains(&self.gamma), "must be in [0, 1]"),
            ("epsilon", self.epsilon, (0.0..=1.0).contains(&self.epsilon), "must be in [0, 1]"),
        ];
        for (field, value, ok, reason) in checks {
            if !ok {
                return Err(Error::InvalidConfig {
                    field,
                    value: value.to_string(),
                    reason,
                });
            }
        }

        let rewards = &self.rewards;
        if ![rewards.own_marker, rewards.empty, rewards.opponent_marker]
            .iter()
            .all(|r| r.is_finite())
        {
            return Err(Error::InvalidConfig {
                field: "rewards",
                value: format!("{rewards:?}"),
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QLearningConfig::default();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reward_schedule() {
        let rewards = RewardSchedule::default();
        assert_eq!(rewards.reward(ActionSignal::OwnMarker), Some(10.0));
        assert_eq!(rewards.reward(ActionSignal::Empty), Some(-1.0));
        assert_eq!(rewards.reward(ActionSignal::OpponentMarker), Some(-50.0));
        assert_eq!(rewards.reward(ActionSignal::Skip), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(QLearningConfig::default().with_alpha(0.0).validate().is_err());
        assert!(QLearningConfig::default().with_gamma(1.5).validate().is_err());
        assert!(QLearningConfig::default().with_epsilon(-0.1).validate().is_err());
        assert!(QLearningConfig::default().with_epsilon(f64::NAN).validate().is_err());

        let rewards = RewardSchedule {
            empty: f64::INFINITY,
            ..RewardSchedule::default()
        };
        assert!(QLearningConfig::default().with_rewards(rewards).validate().is_err());
    }
}

//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for tabular Q-learning
///
/// # Example
///
/// ```rust
/// use qsnake::rl::QLearningConfig;
///
/// let config = QLearningConfig {
///     alpha: 0.2,
///     ..Default::default()
/// };
/// assert_eq!(config.gamma, 0.9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Learning rate of the temporal-difference update
    ///
    /// Default: 0.1
    pub alpha: f64,

    /// Discount factor for future rewards
    ///
    /// Default: 0.9
    pub gamma: f64,

    /// Exploration rate at the start of a run
    ///
    /// Default: 1.0
    pub epsilon_start: f64,

    /// Floor the exploration rate decays towards
    ///
    /// Default: 0.05
    pub epsilon_min: f64,

    /// Linear decrement applied after every finished training episode
    ///
    /// Default: 0.0002
    pub epsilon_decay: f64,

    /// Fixed exploration rate while in play mode. Kept above zero so a greedy
    /// policy cannot lock the snake into an endless loop.
    ///
    /// Default: 0.01
    pub play_epsilon: f64,

    /// Save the table every N finished training episodes
    ///
    /// Default: 100
    pub checkpoint_frequency: u64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon_start: 1.0,
            epsilon_min: 0.05,
            epsilon_decay: 0.0002,
            play_epsilon: 0.01,
            checkpoint_frequency: 100,
        }
    }
}

impl QLearningConfig {
    /// Exploration rate after one more training episode
    pub fn decay_epsilon(&self, epsilon: f64) -> f64 {
        if epsilon > self.epsilon_min {
            (epsilon - self.epsilon_decay).max(self.epsilon_min)
        } else {
            epsilon
        }
    }

    /// Whether the table should be saved after `episode` training episodes
    pub fn is_checkpoint(&self, episode: u64) -> bool {
        self.checkpoint_frequency > 0 && episode % self.checkpoint_frequency == 0
    }
}

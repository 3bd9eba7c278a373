//! Epsilon-greedy Q-learning agent
//!
//! Bundles the table with the hyperparameters, the decaying exploration rate
//! and the random source used for action selection.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

use super::config::QLearningConfig;
use super::observation::Observation;
use super::q_table::QTable;
use crate::game::Action;

/// Whether ticks learn from their outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Decaying exploration, table updated every tick
    #[default]
    Training,
    /// Near-greedy, table is read only
    Play,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Training => Mode::Play,
            Mode::Play => Mode::Training,
        }
    }

    pub fn is_training(self) -> bool {
        self == Mode::Training
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Training => write!(f, "train"),
            Mode::Play => write!(f, "play"),
        }
    }
}

pub struct Agent {
    table: QTable,
    config: QLearningConfig,
    epsilon: f64,
    rng: StdRng,
}

impl Agent {
    pub fn new(table: QTable, config: QLearningConfig) -> Self {
        Self::with_rng(table, config, StdRng::from_entropy())
    }

    pub fn with_seed(table: QTable, config: QLearningConfig, seed: u64) -> Self {
        Self::with_rng(table, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(table: QTable, config: QLearningConfig, rng: StdRng) -> Self {
        Self {
            table,
            epsilon: config.epsilon_start,
            config,
            rng,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Current training exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn exploration_rate(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Training => self.epsilon,
            Mode::Play => self.config.play_epsilon,
        }
    }

    pub fn select_action(&mut self, obs: &Observation, mode: Mode) -> Action {
        let rate = self.exploration_rate(mode);
        self.table.select_action(obs, rate, &mut self.rng)
    }

    /// Apply the TD update for one transition; returns the new estimate
    pub fn learn(
        &mut self,
        obs: &Observation,
        action: Action,
        reward: f64,
        next_obs: &Observation,
    ) -> f64 {
        self.table.update(
            obs,
            action,
            reward,
            next_obs,
            self.config.alpha,
            self.config.gamma,
        )
    }

    /// Decay exploration after a finished training episode
    pub fn end_training_episode(&mut self) {
        self.epsilon = self.config.decay_epsilon(self.epsilon);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::GridWorld;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[error("max_steps must be greater than zero")]
    ZeroStepCeiling,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f64,
    /// Cost of every step that neither eats nor dies
    pub step_penalty: f64,
    /// Penalty for dying
    pub death_penalty: f64,
    /// Added to the step cost when the head moved strictly closer to the food
    pub approach_bonus: f64,
    /// Subtracted from the step cost when the head did not move closer
    pub retreat_penalty: f64,

    /// Episodes are truncated once the step counter exceeds this
    pub max_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            food_reward: 10.0,
            step_penalty: -0.1,
            death_penalty: -10.0,
            approach_bonus: 0.2,
            retreat_penalty: 0.2,
            max_steps: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn grid(&self) -> GridWorld {
        GridWorld::new(self.grid_width, self.grid_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepCeiling);
        }
        Ok(())
    }
}

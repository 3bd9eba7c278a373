//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The same engine drives both training and play.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, GameState, StepInfo, StepResult, Termination};
pub use food::{Food, FoodError};
pub use state::{CollisionType, GridWorld, Position, Snake};

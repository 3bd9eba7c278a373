//! Snake that teaches itself to play with tabular Q-learning
//!
//! This library provides:
//! - Core game logic (game module)
//! - Observation encoding, Q-table, episode loop and persistence (rl module)
//! - TUI rendering and key handling (render, input modules)
//! - Interactive and headless execution modes (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

//! Tabular Q-learning for Snake
//!
//! Provides:
//! - 11-feature boolean observations relative to the snake's heading
//! - A flat Q-table with epsilon-greedy selection and one-step TD updates
//! - The per-episode tick loop and the long-lived training/play session
//! - Atomic JSON persistence of the table

pub mod agent;
pub mod config;
pub mod episode;
pub mod observation;
pub mod persistence;
pub mod q_table;
pub mod session;

pub use agent::{Agent, Mode};
pub use config::QLearningConfig;
pub use episode::{EpisodeError, EpisodeRunner, EpisodeStatus, TickOutcome};
pub use observation::{encode, Observation};
pub use persistence::TableStore;
pub use q_table::QTable;
pub use session::Session;

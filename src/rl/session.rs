//! Long-lived training/play context
//!
//! [`Session`] owns everything that outlives a single episode: the agent and
//! its table, the episode counter, the best score, the table store and the
//! current mode. The UI drives it one tick at a time and reads its accessors
//! for drawing. External signals (mode toggle, save request) are latched and
//! take effect at the start of the next tick.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::agent::{Agent, Mode};
use super::config::QLearningConfig;
use super::episode::{EpisodeRunner, TickOutcome};
use super::persistence::TableStore;
use crate::game::{Food, GameConfig, GameEngine, GameState, GridWorld, Snake};
use crate::metrics::TrainingStats;

/// Number of recent episodes the rolling statistics cover
const STATS_WINDOW: usize = 100;

pub struct Session {
    engine: GameEngine,
    agent: Agent,
    runner: EpisodeRunner,
    store: TableStore,
    stats: TrainingStats,
    mode: Mode,
    /// Finished training episodes since process start
    episode: u64,
    best_score: u32,
    toggle_requested: bool,
    save_requested: bool,
}

impl Session {
    /// Create a session, loading any previously saved table
    pub fn new(
        game_config: GameConfig,
        learning_config: QLearningConfig,
        store: TableStore,
        seed: Option<u64>,
    ) -> Result<Self> {
        game_config.validate().context("Invalid game configuration")?;

        let table = store.load();
        let (engine, agent) = match seed {
            Some(seed) => (
                GameEngine::with_seed(game_config, seed),
                Agent::with_seed(table, learning_config, seed.wrapping_add(1)),
            ),
            None => (GameEngine::new(game_config), Agent::new(table, learning_config)),
        };

        Ok(Self {
            engine,
            agent,
            runner: EpisodeRunner::new(),
            store,
            stats: TrainingStats::new(STATS_WINDOW),
            mode: Mode::Training,
            episode: 0,
            best_score: 0,
            toggle_requested: false,
            save_requested: false,
        })
    }

    /// Flip between training and play at the next tick boundary
    pub fn toggle_mode(&mut self) {
        self.toggle_requested = !self.toggle_requested;
    }

    /// Save the table at the next tick boundary
    pub fn request_save(&mut self) {
        self.save_requested = true;
    }

    /// Advance the simulation by one tick
    ///
    /// Starts a new episode first if the previous one has terminated.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.apply_signals();

        if !self.runner.is_running() {
            self.runner = EpisodeRunner::new();
            self.runner
                .start(&mut self.engine)
                .context("Failed to start episode")?;
        }

        let outcome = self
            .runner
            .tick(&mut self.engine, &mut self.agent, self.mode)?;

        self.best_score = self.best_score.max(outcome.score);

        if outcome.done {
            self.finish_episode(&outcome);
        }

        Ok(outcome)
    }

    /// Persist the table now, retrying once on failure
    pub fn save(&self) -> Result<()> {
        self.store.save_with_retry(self.agent.table())?;
        info!(
            path = ?self.store.path(),
            entries = self.agent.table().len(),
            "Q-table saved"
        );
        Ok(())
    }

    /// Final save before the process exits
    pub fn shutdown(&mut self) -> Result<()> {
        info!(episode = self.episode, best = self.best_score, "shutting down");
        self.save()
    }

    fn apply_signals(&mut self) {
        if std::mem::take(&mut self.toggle_requested) {
            self.mode = self.mode.toggled();
            info!(mode = %self.mode, "mode switched");
        }

        if std::mem::take(&mut self.save_requested) {
            self.save_logged("manual save");
        }
    }

    fn finish_episode(&mut self, outcome: &TickOutcome) {
        self.stats
            .record_episode(self.runner.total_reward(), outcome.steps, outcome.score);

        debug!(
            mode = %self.mode,
            score = outcome.score,
            steps = outcome.steps,
            termination = ?outcome.termination,
            "episode finished"
        );

        if self.mode.is_training() {
            self.episode += 1;
            self.agent.end_training_episode();

            if self.agent.config().is_checkpoint(self.episode) {
                self.save_logged("checkpoint");
            }
        }
    }

    /// Save failures are reported but never stop the run
    fn save_logged(&self, reason: &str) {
        if let Err(err) = self.save() {
            error!(reason, error = %format!("{err:#}"), "Q-table save failed");
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Current training exploration rate
    pub fn epsilon(&self) -> f64 {
        self.agent.epsilon()
    }

    /// Exploration rate the next tick will use
    pub fn exploration_rate(&self) -> f64 {
        self.agent.exploration_rate(self.mode)
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Score of the current (or just finished) episode
    pub fn score(&self) -> u32 {
        self.game_state().map_or(0, |s| s.score)
    }

    pub fn steps(&self) -> u32 {
        self.game_state().map_or(0, |s| s.steps)
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.runner.state()
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.game_state().map(|s| &s.snake)
    }

    pub fn food(&self) -> Option<&Food> {
        self.game_state().map(|s| &s.food)
    }

    pub fn grid(&self) -> GridWorld {
        self.engine.grid()
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }
}

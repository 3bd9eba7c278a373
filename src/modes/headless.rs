//! Unattended training without a terminal UI
//!
//! Runs training episodes back to back as fast as the CPU allows, logging a
//! progress summary every `log_frequency` episodes. The table is saved at the
//! session's checkpoints and once more when training stops, including when it
//! is interrupted.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use crate::rl::{Mode, Session};

#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of training episodes to run
    pub num_episodes: u64,
    /// Log training progress every N episodes
    pub log_frequency: u64,
}

impl HeadlessConfig {
    pub fn new(num_episodes: u64) -> Self {
        Self {
            num_episodes,
            log_frequency: 100,
        }
    }
}

pub struct HeadlessTrainer {
    session: Session,
    config: HeadlessConfig,
}

impl HeadlessTrainer {
    pub fn new(session: Session, config: HeadlessConfig) -> Self {
        Self { session, config }
    }

    /// Train until the episode budget is spent or `stop` is raised
    pub fn run(&mut self, stop: &AtomicBool) -> Result<()> {
        let learning = self.session.agent().config();
        info!(
            episodes = self.config.num_episodes,
            grid = %format!("{}x{}", self.session.grid().width, self.session.grid().height),
            alpha = learning.alpha,
            gamma = learning.gamma,
            epsilon = self.session.epsilon(),
            table = ?self.session.store().path(),
            "headless training started"
        );

        let result = self.train(stop);
        let saved = self.session.shutdown();

        info!(summary = %self.session.stats().format_summary(), "training finished");
        result.and(saved)
    }

    fn train(&mut self, stop: &AtomicBool) -> Result<()> {
        if self.session.mode() != Mode::Training {
            self.session.toggle_mode();
        }

        let target = self.session.episode() + self.config.num_episodes;

        while self.session.episode() < target {
            if stop.load(Ordering::Relaxed) {
                info!(episode = self.session.episode(), "training interrupted");
                break;
            }

            let outcome = self.session.tick()?;

            if outcome.done && self.should_log() {
                info!(
                    episode = self.session.episode(),
                    epsilon = %format!("{:.4}", self.session.epsilon()),
                    best = self.session.best_score(),
                    "{}",
                    self.session.stats().format_summary()
                );
            }
        }

        Ok(())
    }

    fn should_log(&self) -> bool {
        self.config.log_frequency > 0 && self.session.episode() % self.config.log_frequency == 0
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

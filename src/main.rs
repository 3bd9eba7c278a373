use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use qsnake::game::GameConfig;
use qsnake::logging::{self, LogTarget};
use qsnake::modes::{HeadlessConfig, HeadlessTrainer, InteractiveMode};
use qsnake::rl::{QLearningConfig, Session, TableStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "qsnake")]
#[command(version, about = "Snake that learns to play itself with Q-learning")]
struct Cli {
    /// How to run the session
    #[arg(long, default_value = "interactive")]
    mode: RunMode,

    /// Grid width
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(2..))]
    width: u16,

    /// Grid height
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(2..))]
    height: u16,

    /// Episodes end once this many steps have been taken
    #[arg(long, default_value_t = 1000)]
    max_steps: u32,

    /// Q-table file
    #[arg(long, default_value = "qtable_snake.json")]
    table: PathBuf,

    /// Number of training episodes (headless only)
    #[arg(long, default_value_t = 10_000)]
    episodes: u64,

    /// Save the table every N training episodes
    #[arg(long, default_value_t = 100)]
    checkpoint_every: u64,

    /// Log progress every N episodes (headless only)
    #[arg(long, default_value_t = 100)]
    log_every: u64,

    /// Log file used by the interactive mode
    #[arg(long, default_value = "qsnake.log")]
    log_file: PathBuf,

    /// Maximum log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum RunMode {
    /// Terminal UI; SPACE switches between training and watching
    Interactive,
    /// Train without a UI as fast as possible
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match cli.mode {
        RunMode::Interactive => LogTarget::File(&cli.log_file),
        RunMode::Headless => LogTarget::Stderr,
    };
    logging::init(target, cli.log_level)?;

    let game_config =
        GameConfig::new(cli.width.into(), cli.height.into()).with_max_steps(cli.max_steps);
    let learning_config = QLearningConfig {
        checkpoint_frequency: cli.checkpoint_every,
        ..Default::default()
    };
    let session = Session::new(
        game_config,
        learning_config,
        TableStore::new(cli.table),
        cli.seed,
    )?;

    // Dispatch to appropriate mode
    match cli.mode {
        RunMode::Interactive => {
            let mut interactive = InteractiveMode::new(session);
            interactive.run().await?;
        }
        RunMode::Headless => {
            let stop = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&stop);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    flag.store(true, Ordering::Relaxed);
                }
            });

            let config = HeadlessConfig {
                num_episodes: cli.episodes,
                log_frequency: cli.log_every,
            };
            let mut trainer = HeadlessTrainer::new(session, config);
            tokio::task::spawn_blocking(move || trainer.run(&stop))
                .await
                .context("Training task panicked")??;
        }
    }

    Ok(())
}

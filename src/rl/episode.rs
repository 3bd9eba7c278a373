//! One episode of the simulation-and-learning loop
//!
//! An [`EpisodeRunner`] moves through `Idle -> Running -> Terminated` exactly
//! once. Each tick observes, acts, moves the snake, scores the move and, in
//! training mode, updates the table before handing the outcome back to the
//! caller. A terminated runner is never resumed; the caller starts a new one.

use thiserror::Error;

use super::agent::{Agent, Mode};
use super::observation::{encode, Observation};
use crate::game::{Action, FoodError, GameEngine, GameState, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Idle,
    Running,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpisodeError {
    #[error("episode is {0:?}, not running")]
    NotRunning(EpisodeStatus),
    #[error("episode is already {0:?}")]
    AlreadyStarted(EpisodeStatus),
    #[error(transparent)]
    Food(#[from] FoodError),
}

/// Everything a tick produced, for rendering and telemetry
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Observation the action was chosen from
    pub observation: Observation,
    pub action: Action,
    pub reward: f64,
    /// Observation after the move
    pub next_observation: Observation,
    pub done: bool,
    pub ate_food: bool,
    pub termination: Option<Termination>,
    pub score: u32,
    pub steps: u32,
    /// Table estimate after the update, `None` when the tick did not learn
    pub updated_value: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct EpisodeRunner {
    status: EpisodeStatus,
    state: Option<GameState>,
    total_reward: f64,
}

impl Default for EpisodeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeRunner {
    pub fn new() -> Self {
        Self {
            status: EpisodeStatus::Idle,
            state: None,
            total_reward: 0.0,
        }
    }

    /// Runner that is already running from a prepared game state
    pub fn from_state(state: GameState) -> Self {
        Self {
            status: EpisodeStatus::Running,
            state: Some(state),
            total_reward: 0.0,
        }
    }

    /// Spawn a fresh snake and food and start running
    pub fn start(&mut self, engine: &mut GameEngine) -> Result<(), EpisodeError> {
        if self.status != EpisodeStatus::Idle {
            return Err(EpisodeError::AlreadyStarted(self.status));
        }

        match engine.reset() {
            Ok(state) => {
                self.state = Some(state);
                self.status = EpisodeStatus::Running;
                Ok(())
            }
            Err(err) => {
                self.status = EpisodeStatus::Terminated;
                Err(err.into())
            }
        }
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EpisodeStatus::Running
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Sum of rewards collected so far
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Run one full tick with an action chosen by the agent
    pub fn tick(
        &mut self,
        engine: &mut GameEngine,
        agent: &mut Agent,
        mode: Mode,
    ) -> Result<TickOutcome, EpisodeError> {
        let state = self.running_state()?;
        let observation = encode(&state.grid, &state.snake, &state.food);
        let action = agent.select_action(&observation, mode);

        self.advance(engine, agent, mode, observation, action)
    }

    /// Run one tick with a caller-chosen action
    ///
    /// `observation` must be the encoding of the current state; it is the key
    /// the training update is applied to.
    pub fn advance(
        &mut self,
        engine: &mut GameEngine,
        agent: &mut Agent,
        mode: Mode,
        observation: Observation,
        action: Action,
    ) -> Result<TickOutcome, EpisodeError> {
        let state = self.running_state_mut()?;

        let result = engine.step(state, action);
        let next_observation = encode(&state.grid, &state.snake, &state.food);
        let (score, steps) = (state.score, state.steps);

        let updated_value = mode
            .is_training()
            .then(|| agent.learn(&observation, action, result.reward, &next_observation));

        self.total_reward += result.reward;
        if result.terminated {
            self.status = EpisodeStatus::Terminated;
        }

        Ok(TickOutcome {
            observation,
            action,
            reward: result.reward,
            next_observation,
            done: result.terminated,
            ate_food: result.info.ate_food,
            termination: result.info.termination,
            score,
            steps,
            updated_value,
        })
    }

    fn running_state(&self) -> Result<&GameState, EpisodeError> {
        match (&self.status, &self.state) {
            (EpisodeStatus::Running, Some(state)) => Ok(state),
            _ => Err(EpisodeError::NotRunning(self.status)),
        }
    }

    fn running_state_mut(&mut self) -> Result<&mut GameState, EpisodeError> {
        match (&self.status, &mut self.state) {
            (EpisodeStatus::Running, Some(state)) => Ok(state),
            (status, _) => Err(EpisodeError::NotRunning(*status)),
        }
    }
}

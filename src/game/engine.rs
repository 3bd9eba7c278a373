use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use super::{
    action::Action,
    config::GameConfig,
    food::{Food, FoodError},
    state::{CollisionType, GridWorld, Position, Snake},
};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Collision(CollisionType),
    /// Step counter exceeded the configured ceiling
    StepLimit,
    /// Food was eaten but no free cell was left to relocate it
    NoSpace,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Manhattan distance from head to food before the move
    pub distance_before: u32,
    /// Set when this step ended the episode
    pub termination: Option<Termination>,
}

impl StepInfo {
    pub fn collision_type(&self) -> Option<CollisionType> {
        match self.termination {
            Some(Termination::Collision(kind)) => Some(kind),
            _ => None,
        }
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f64,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Complete game state for one episode
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: GridWorld,
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(grid: GridWorld, snake: Snake, food: Food) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a reproducible food/spawn sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridWorld {
        self.config.grid()
    }

    /// Start a fresh episode: centered single-cell snake, random heading, new food
    pub fn reset(&mut self) -> Result<GameState, FoodError> {
        let grid = self.grid();
        let snake = Snake::spawn(&grid, &mut self.rng);
        let food = Food::spawn(&grid, &snake.body, &mut self.rng)?;

        Ok(GameState::new(grid, snake, food))
    }

    /// Execute one step of the game
    ///
    /// Turns the snake according to `action`, moves it one cell and scores the
    /// outcome. Food eaten this step makes the snake grow on its next move.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    distance_before: state.snake.head().manhattan(state.food.position),
                    termination: None,
                },
            };
        }

        state.steps += 1;

        let heading = action.apply(state.snake.direction);
        state.snake.set_heading(heading);

        let distance_before = state.grid.distance(state.snake.head(), state.food.position);

        state.snake.move_forward();

        let mut ate_food = false;
        let mut termination = None;
        let reward;

        if let Some(collision) = self.check_collision(state) {
            reward = self.config.death_penalty;
            termination = Some(Termination::Collision(collision));
        } else if state.snake.head() == state.food.position {
            state.snake.grow();
            state.score += 1;
            ate_food = true;
            reward = self.config.food_reward;

            if let Err(err) = state
                .food
                .respawn(&state.grid, &state.snake.body, &mut self.rng)
            {
                warn!(%err, score = state.score, "ending episode, food cannot be placed");
                termination = Some(Termination::NoSpace);
            }
        } else {
            let distance_after = state.grid.distance(state.snake.head(), state.food.position);
            reward = if distance_after < distance_before {
                self.config.step_penalty + self.config.approach_bonus
            } else {
                self.config.step_penalty - self.config.retreat_penalty
            };
        }

        if termination.is_none() && state.steps > self.config.max_steps {
            termination = Some(Termination::StepLimit);
        }

        state.is_alive = termination.is_none();

        StepResult {
            reward,
            terminated: termination.is_some(),
            info: StepInfo {
                ate_food,
                distance_before,
                termination,
            },
        }
    }

    /// Check whether the snake's head is on a wall or its own body
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if state.snake.collides_with_wall(&state.grid) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_self() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

//! Discrete observation used as the Q-table key
//!
//! The snake only ever sees eleven booleans: whether the cells ahead, to its
//! left and to its right are deadly, which way the food lies, and which way it
//! is heading. "Left" and "right" are relative to the current heading.

use serde::{Deserialize, Serialize};

use crate::game::{Direction, Food, GridWorld, Position, Snake};

/// Number of boolean features in an [`Observation`]
pub const OBSERVATION_SIZE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Observation {
    pub danger_ahead: bool,
    pub danger_left: bool,
    pub danger_right: bool,
    pub food_left: bool,
    pub food_right: bool,
    pub food_up: bool,
    pub food_down: bool,
    pub heading_up: bool,
    pub heading_down: bool,
    pub heading_left: bool,
    pub heading_right: bool,
}

impl Observation {
    /// Features in their canonical order
    pub fn features(&self) -> [bool; OBSERVATION_SIZE] {
        [
            self.danger_ahead,
            self.danger_left,
            self.danger_right,
            self.food_left,
            self.food_right,
            self.food_up,
            self.food_down,
            self.heading_up,
            self.heading_down,
            self.heading_left,
            self.heading_right,
        ]
    }

    /// Pack the features into the low 11 bits, first feature in bit 0
    pub fn bits(&self) -> u16 {
        self.features()
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &f)| acc | ((f as u16) << i))
    }
}

/// A projected cell is deadly when it is off the grid or on a non-head segment
fn is_danger(grid: &GridWorld, snake: &Snake, pos: Position) -> bool {
    !grid.in_bounds(pos) || snake.collides_with_body(pos)
}

/// Encode the current snake and food into an observation
pub fn encode(grid: &GridWorld, snake: &Snake, food: &Food) -> Observation {
    let head = snake.head();
    let heading = snake.direction;

    let ahead = head.moved_in_direction(heading);
    let left = head.moved_in_direction(heading.turn_left());
    let right = head.moved_in_direction(heading.turn_right());

    let target = food.position;

    Observation {
        danger_ahead: is_danger(grid, snake, ahead),
        danger_left: is_danger(grid, snake, left),
        danger_right: is_danger(grid, snake, right),
        food_left: target.x < head.x,
        food_right: target.x > head.x,
        food_up: target.y < head.y,
        food_down: target.y > head.y,
        heading_up: heading == Direction::Up,
        heading_down: heading == Direction::Down,
        heading_left: heading == Direction::Left,
        heading_right: heading == Direction::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridWorld {
        GridWorld::new(20, 20)
    }

    #[test]
    fn test_open_field() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 1);
        let food = Food::new(Position::new(15, 4));

        let obs = encode(&grid(), &snake, &food);

        assert!(!obs.danger_ahead && !obs.danger_left && !obs.danger_right);
        assert!(obs.food_right && obs.food_up);
        assert!(!obs.food_left && !obs.food_down);
        assert!(obs.heading_right);
        assert!(!obs.heading_up && !obs.heading_down && !obs.heading_left);
    }

    #[test]
    fn test_wall_danger_is_heading_relative() {
        // Heading up along the left wall: the wall is on the snake's left
        let snake = Snake::new(Position::new(0, 10), Direction::Up, 1);
        let food = Food::new(Position::new(5, 5));

        let obs = encode(&grid(), &snake, &food);
        assert!(!obs.danger_ahead);
        assert!(obs.danger_left);
        assert!(!obs.danger_right);

        // Heading down along the same wall: now it is on the right
        let snake = Snake::new(Position::new(0, 10), Direction::Down, 1);
        let obs = encode(&grid(), &snake, &food);
        assert!(!obs.danger_left);
        assert!(obs.danger_right);
    }

    #[test]
    fn test_corner_danger() {
        let snake = Snake::new(Position::new(19, 0), Direction::Right, 1);
        let food = Food::new(Position::new(5, 5));

        let obs = encode(&grid(), &snake, &food);
        assert!(obs.danger_ahead);
        assert!(obs.danger_left);
        assert!(!obs.danger_right);
    }

    #[test]
    fn test_body_danger() {
        // Body curls around below the head
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1);
        snake.body = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(6, 6),
        ];
        let food = Food::new(Position::new(10, 10));

        let obs = encode(&grid(), &snake, &food);
        assert!(!obs.danger_ahead);
        assert!(!obs.danger_left);
        assert!(obs.danger_right);
    }

    #[test]
    fn test_food_ties_are_false() {
        let snake = Snake::new(Position::new(10, 10), Direction::Up, 1);
        let food = Food::new(Position::new(10, 3));

        let obs = encode(&grid(), &snake, &food);
        assert!(!obs.food_left && !obs.food_right);
        assert!(obs.food_up);
        assert!(!obs.food_down);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let snake = Snake::new(Position::new(7, 3), Direction::Left, 4);
        let food = Food::new(Position::new(2, 9));

        assert_eq!(
            encode(&grid(), &snake, &food),
            encode(&grid(), &snake.clone(), &food)
        );
    }

    #[test]
    fn test_heading_one_hot() {
        let food = Food::new(Position::new(0, 0));
        for dir in Direction::ALL {
            let snake = Snake::new(Position::new(10, 10), dir, 1);
            let obs = encode(&grid(), &snake, &food);
            let hot = [
                obs.heading_up,
                obs.heading_down,
                obs.heading_left,
                obs.heading_right,
            ];
            assert_eq!(hot.iter().filter(|&&h| h).count(), 1);
        }
    }

    #[test]
    fn test_bits_layout() {
        let snake = Snake::new(Position::new(19, 10), Direction::Right, 1);
        let food = Food::new(Position::new(19, 10));

        let obs = encode(&grid(), &snake, &food);
        // danger_ahead (bit 0) and heading_right (bit 10)
        assert_eq!(obs.bits(), 0b100_0000_0001);
    }
}

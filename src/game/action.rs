use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Heading after a 90-degree counter-clockwise turn, as seen from above
    pub fn turn_left(&self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Heading after a 90-degree clockwise turn
    pub fn turn_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Action chosen by the agent, relative to the snake's current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    Straight,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::TurnLeft, Action::Straight, Action::TurnRight];

    pub fn index(&self) -> usize {
        match self {
            Action::TurnLeft => 0,
            Action::Straight => 1,
            Action::TurnRight => 2,
        }
    }

    /// Translate this relative action into an absolute heading
    pub fn apply(&self, heading: Direction) -> Direction {
        match self {
            Action::TurnLeft => heading.turn_left(),
            Action::Straight => heading,
            Action::TurnRight => heading.turn_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_turns_are_inverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.turn_left().turn_right(), dir);
            assert_eq!(dir.turn_right().turn_left(), dir);
            assert!(!dir.turn_left().is_opposite(dir));
            assert!(!dir.turn_right().is_opposite(dir));
        }
    }

    #[test]
    fn test_relative_actions() {
        assert_eq!(Action::TurnLeft.apply(Direction::Up), Direction::Left);
        assert_eq!(Action::TurnRight.apply(Direction::Up), Direction::Right);
        assert_eq!(Action::Straight.apply(Direction::Up), Direction::Up);

        assert_eq!(Action::TurnLeft.apply(Direction::Right), Direction::Up);
        assert_eq!(Action::TurnRight.apply(Direction::Right), Direction::Down);
    }

    #[test]
    fn test_relative_action_never_reverses() {
        for dir in Direction::ALL {
            for action in Action::ALL {
                assert!(!action.apply(dir).is_opposite(dir));
            }
        }
    }

    #[test]
    fn test_action_index() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }
}

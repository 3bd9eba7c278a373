use rand::Rng;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another position
    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Grid dimensions and coordinate arithmetic. Positions are never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWorld {
    pub width: usize,
    pub height: usize,
}

impl GridWorld {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn distance(&self, a: Position, b: Position) -> u32 {
        a.manhattan(b)
    }

    /// Sample a uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(0..self.width) as i32,
            rng.gen_range(0..self.height) as i32,
        )
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Position::new(x as i32, y as i32)))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Set when food was eaten; consumed by the next move
    growing: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            growing: false,
        }
    }

    /// Fresh single-cell snake at the grid center with a random heading
    pub fn spawn<R: Rng + ?Sized>(grid: &GridWorld, rng: &mut R) -> Self {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Self::new(grid.center(), direction, 1)
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, grid: &GridWorld, rng: &mut R) {
        *self = Self::spawn(grid, rng);
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Change heading. The exact reverse of the current heading is ignored.
    pub fn set_heading(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Mark the snake to grow by one segment on its next move
    pub fn grow(&mut self) {
        self.growing = true;
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Advance one cell in the current direction
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop();
        }
    }

    pub fn collides_with_wall(&self, grid: &GridWorld) -> bool {
        !grid.in_bounds(self.head())
    }

    pub fn collides_with_self(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_manhattan_distance() {
        let grid = GridWorld::new(20, 20);
        assert_eq!(grid.distance(Position::new(0, 0), Position::new(3, 4)), 7);
        assert_eq!(grid.distance(Position::new(3, 4), Position::new(0, 0)), 7);
        assert_eq!(Position::new(-1, 2).manhattan(Position::new(1, 2)), 2);
        assert_eq!(Position::new(5, 5).manhattan(Position::new(5, 5)), 0);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = GridWorld::new(20, 20);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 19)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = GridWorld::new(3, 2);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert!(cells.iter().all(|&c| grid.in_bounds(c)));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
    }

    #[test]
    fn test_spawn_is_centered_single_cell() {
        let grid = GridWorld::new(20, 20);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let snake = Snake::spawn(&grid, &mut rng);
            assert_eq!(snake.len(), 1);
            assert_eq!(snake.head(), Position::new(10, 10));
            assert!(!snake.is_growing());
        }
    }

    #[test]
    fn test_reset_clears_growth() {
        let grid = GridWorld::new(10, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut snake = Snake::new(Position::new(2, 2), Direction::Down, 4);
        snake.grow();

        snake.reset(&grid, &mut rng);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), grid.center());
        assert!(!snake.is_growing());
    }

    #[test]
    fn test_set_heading_rejects_reverse() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = Snake::new(Position::new(5, 5), current, 1);
                snake.set_heading(requested);
                if current.is_opposite(requested) {
                    assert_eq!(snake.direction, current);
                } else {
                    assert_eq!(snake.direction, requested);
                }
            }
        }
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.move_forward();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        // Growth applies on the next move only
        snake.grow();
        snake.move_forward();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(!snake.is_growing());

        snake.move_forward();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_body_stays_adjacent() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        for dir in [Direction::Down, Direction::Left, Direction::Down, Direction::Right] {
            snake.set_heading(dir);
            snake.move_forward();
            for pair in snake.body.windows(2) {
                assert_eq!(pair[0].manhattan(pair[1]), 1);
            }
        }
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_wall_collision() {
        let grid = GridWorld::new(10, 10);
        let mut snake = Snake::new(Position::new(0, 5), Direction::Left, 1);
        assert!(!snake.collides_with_wall(&grid));

        snake.move_forward();
        assert!(snake.collides_with_wall(&grid));
    }

    #[test]
    fn test_self_collision() {
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5);

        snake.set_heading(Direction::Down);
        snake.move_forward();
        snake.set_heading(Direction::Left);
        snake.move_forward();
        assert!(!snake.collides_with_self());

        snake.set_heading(Direction::Up);
        snake.move_forward();
        assert!(snake.collides_with_self());
    }
}

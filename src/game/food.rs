use rand::Rng;
use thiserror::Error;

use super::state::{GridWorld, Position};

/// Rejection-sampling attempts per grid cell before falling back to a scan
const SAMPLES_PER_CELL: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoodError {
    #[error("no free cell left for food on a {width}x{height} grid")]
    NoSpace { width: usize, height: usize },
}

/// The single active food cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Place food on a random cell not in `occupied`
    pub fn spawn<R: Rng + ?Sized>(
        grid: &GridWorld,
        occupied: &[Position],
        rng: &mut R,
    ) -> Result<Self, FoodError> {
        Ok(Self::new(free_cell(grid, occupied, rng)?))
    }

    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        grid: &GridWorld,
        occupied: &[Position],
        rng: &mut R,
    ) -> Result<(), FoodError> {
        self.position = free_cell(grid, occupied, rng)?;
        Ok(())
    }
}

fn free_cell<R: Rng + ?Sized>(
    grid: &GridWorld,
    occupied: &[Position],
    rng: &mut R,
) -> Result<Position, FoodError> {
    let no_space = FoodError::NoSpace {
        width: grid.width,
        height: grid.height,
    };

    if grid.cell_count() == 0 {
        return Err(no_space);
    }

    for _ in 0..grid.cell_count() * SAMPLES_PER_CELL {
        let pos = grid.random_cell(rng);
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    // Nearly full grid: pick uniformly among whatever is left
    let free: Vec<Position> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    if free.is_empty() {
        return Err(no_space);
    }
    Ok(free[rng.gen_range(0..free.len())])
}

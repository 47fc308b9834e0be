use log::trace;

use super::collaborators::RandomSource;
use super::move_validator::adjacent_positions;
use crate::model::{GameError, TileGrid};

pub const DEFAULT_SHUFFLE_STEPS: usize = 1000;
/// Fewer steps than this leave the board too close to solved to be worth playing.
pub const MIN_SHUFFLE_STEPS: usize = 50;

/// Slides the blank `steps` times, each time into a uniformly chosen
/// neighbour. Only legal slides are made, so the result is always solvable.
pub fn random_walk(grid: &TileGrid, steps: usize, rng: &mut dyn RandomSource) -> TileGrid {
    let mut grid = *grid;
    for _ in 0..steps {
        let adjacent = adjacent_positions(grid.empty_position());
        let target = adjacent[rng.uniform(adjacent.len())];
        grid = grid.swap(grid.empty_position(), target);
    }
    grid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shuffler {
    steps: usize,
}

impl Default for Shuffler {
    fn default() -> Self {
        Self {
            steps: DEFAULT_SHUFFLE_STEPS,
        }
    }
}

impl Shuffler {
    pub fn new(steps: usize) -> Result<Self, GameError> {
        if steps < MIN_SHUFFLE_STEPS {
            return Err(GameError::ShuffleTooShort {
                steps,
                min: MIN_SHUFFLE_STEPS,
            });
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The walk may, rarely, end back on the solved grid. That is accepted.
    pub fn shuffle(&self, grid: &TileGrid, rng: &mut dyn RandomSource) -> TileGrid {
        let shuffled = random_walk(grid, self.steps, rng);
        trace!(target: "shuffle", "Shuffled {} steps:\n{}", self.steps, shuffled);
        shuffled
    }
}

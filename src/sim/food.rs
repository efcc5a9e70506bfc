//! Food placement

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, Grid};
use crate::error::GridFull;

/// Places food uniformly at random on a free cell.
///
/// Free cells are enumerated and one is drawn by index, so every free cell
/// is equally likely and a call never retries.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: Pcg32,
}

impl FoodSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a cell of `grid` not in `occupied`
    pub fn spawn(&mut self, grid: &Grid, occupied: &HashSet<Cell>) -> Result<Cell, GridFull> {
        let free: Vec<Cell> = grid.cells().filter(|c| !occupied.contains(c)).collect();
        if free.is_empty() {
            return Err(GridFull { size: grid.size });
        }
        let index = self.rng.random_range(0..free.len());
        Ok(free[index])
    }
}

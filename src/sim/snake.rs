//! Snake body and movement directions

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Movement direction. `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset `(dx, dy)`
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning to `self` would reverse `current`
    #[inline]
    pub fn reverses(self, current: Direction) -> bool {
        self == current.opposite()
    }
}

/// Occupied cells, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    cells: VecDeque<Cell>,
}

impl SnakeBody {
    /// Build a body from cells ordered head first.
    ///
    /// Returns `None` for an empty sequence.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: VecDeque<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return None;
        }
        Some(Self { cells })
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a body keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Cells the new head must not land on this tick.
    ///
    /// When the tail moves (no food eaten) the cell it vacates is free for
    /// the head in the same tick, so it is left out. When the snake grows
    /// the tail stays put and counts as an obstacle.
    pub fn obstacles(&self, tail_moves: bool) -> impl Iterator<Item = &Cell> {
        let n = if tail_moves {
            self.cells.len() - 1
        } else {
            self.cells.len()
        };
        self.cells.iter().take(n)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }

    /// Drop the tail, never the last remaining cell
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.cells.len() > 1 {
            self.cells.pop_back()
        } else {
            None
        }
    }

    /// Occupied cells as a set, for food placement
    pub fn occupied(&self) -> HashSet<Cell> {
        self.cells.iter().copied().collect()
    }

    /// True if any cell appears twice
    pub fn self_intersects(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.cells.len());
        !self.cells.iter().all(|c| seen.insert(*c))
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }
}

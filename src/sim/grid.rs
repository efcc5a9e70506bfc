//! Grid coordinate space
//!
//! Cells use signed coordinates so a proposed head can sit one step outside
//! the grid until it has been judged.

use serde::{Deserialize, Serialize};

use super::snake::Direction;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// What happens when the head crosses an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Edges are walls; leaving the grid ends the run
    #[default]
    Walls,
    /// The head re-enters from the opposite edge
    Wrap,
}

/// Canvas rectangle for a cell, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Square playing field of `size` x `size` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub size: i32,
    pub cell_size: u32,
    pub boundary: Boundary,
}

impl Grid {
    pub fn new(size: i32, cell_size: u32, boundary: Boundary) -> Self {
        Self {
            size,
            cell_size,
            boundary,
        }
    }

    /// True if the cell lies inside `[0, size)` on both axes
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        let side = self.size.max(0) as usize;
        side * side
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let size = self.size.max(0);
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
    }

    /// Apply the boundary policy to a proposed head.
    ///
    /// With walls the cell is returned as-is so the collision judge can
    /// report it; with wrapping it is folded back onto the grid.
    pub fn resolve(&self, cell: Cell) -> Cell {
        match self.boundary {
            Boundary::Walls => cell,
            Boundary::Wrap => Cell::new(cell.x.rem_euclid(self.size), cell.y.rem_euclid(self.size)),
        }
    }

    /// Starting body: `len` cells laid out leftward from the centre, head first
    pub fn spawn_body(&self, len: usize) -> Vec<Cell> {
        let center = self.size / 2;
        (0..len as i32).map(|i| Cell::new(center - i, center)).collect()
    }

    /// Canvas rectangle for a cell, leaving a one pixel gutter
    pub fn pixel_rect(&self, cell: Cell) -> PixelRect {
        let side = self.cell_size.saturating_sub(1);
        PixelRect {
            x: cell.x.max(0) as u32 * self.cell_size,
            y: cell.y.max(0) as u32 * self.cell_size,
            width: side,
            height: side,
        }
    }

    /// Canvas dimensions in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        let side = self.size.max(0) as u32 * self.cell_size;
        (side, side)
    }
}

//! Collision judgment for a proposed head cell
//!
//! Pure: no engine state, so it can be exercised on its own.

use super::grid::{Cell, Grid};

/// Outcome of moving the head onto a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The move is allowed
    Safe,
    /// The head left the grid
    Wall,
    /// The head ran into the snake's own body
    Body,
}

/// Judge a proposed head against the grid and the cells it must avoid.
///
/// `body` is the obstacle set for this tick; see
/// [`SnakeBody::obstacles`](super::snake::SnakeBody::obstacles) for how the
/// tail is included or excluded.
pub fn judge<'a>(grid: &Grid, head: Cell, body: impl IntoIterator<Item = &'a Cell>) -> Collision {
    if !grid.contains(head) {
        return Collision::Wall;
    }
    if body.into_iter().any(|c| *c == head) {
        return Collision::Body;
    }
    Collision::Safe
}

//! Idle/demo mode player
//!
//! Greedy: heads for the food along safe moves, preferring cells with more
//! room around them when distances tie.

use super::collision::{Collision, judge};
use super::grid::Cell;
use super::snake::Direction;
use super::state::GameEngine;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Pick the next turn, or `None` when every move is fatal
    pub fn choose(&self, engine: &GameEngine) -> Option<Direction> {
        let grid = engine.grid();
        let body = engine.body();
        let food = engine.food();

        Direction::ALL
            .into_iter()
            .filter(|dir| !dir.reverses(engine.direction()))
            .filter_map(|dir| {
                let head = grid.resolve(body.head().step(dir));
                let eats = food == Some(head);
                if judge(grid, head, body.obstacles(!eats)) != Collision::Safe {
                    return None;
                }
                let distance = food.map_or(0, |f| manhattan(head, f));
                let room = Direction::ALL
                    .into_iter()
                    .map(|next| grid.resolve(head.step(next)))
                    .filter(|cell| judge(grid, *cell, body.obstacles(true)) == Collision::Safe)
                    .count();
                Some((dir, distance, room))
            })
            // Short distance first, then more room; stay on course otherwise
            .min_by_key(|&(dir, distance, room)| (distance, usize::MAX - room, dir != engine.direction()))
            .map(|(dir, _, _)| dir)
    }
}

fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Layout, RunState};

    #[test]
    fn test_heads_for_food() {
        let layout = Layout {
            body: vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            direction: Direction::Right,
            food: Cell::new(5, 1),
        };
        let engine = GameEngine::from_layout(&Settings::default(), 3, layout).unwrap();
        assert_eq!(Autopilot.choose(&engine), Some(Direction::Up));
    }

    #[test]
    fn test_avoids_wall() {
        let layout = Layout {
            body: vec![Cell::new(19, 5), Cell::new(18, 5), Cell::new(17, 5)],
            direction: Direction::Right,
            food: Cell::new(19, 15),
        };
        let engine = GameEngine::from_layout(&Settings::default(), 3, layout).unwrap();
        assert_eq!(Autopilot.choose(&engine), Some(Direction::Down));
    }

    #[test]
    fn test_plays_a_run_to_the_end() {
        let mut engine = GameEngine::with_seed(&Settings::default(), 11).unwrap();
        engine.start();
        for _ in 0..5_000 {
            if engine.phase() != RunState::Running {
                break;
            }
            if let Some(dir) = Autopilot.choose(&engine) {
                engine.steer(dir);
            }
            engine.tick();
            assert!(!engine.body().self_intersects());
        }
        assert!(engine.score() > 0);
    }
}

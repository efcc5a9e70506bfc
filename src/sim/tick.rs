//! One discrete simulation step
//!
//! A tick either commits fully (head placed, tail moved or food eaten) or
//! ends the run before touching the body.

use std::time::Duration;

use super::collision::{Collision, judge};
use super::state::{GameEngine, RunState};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// Head left the grid
    Wall,
    /// Head hit the snake's own body
    Body,
    /// The snake filled every cell; no room for more food
    GridFull,
}

/// Final figures of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cause: EndCause,
    pub score: u32,
    pub level: u32,
    pub length: usize,
}

/// New speed after a level increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub interval: Duration,
}

/// Result of a call to [`GameEngine::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Engine was not running; nothing happened
    Skipped,
    /// Snake moved one cell
    Moved,
    /// Snake ate food and grew by one cell
    Grew { level_up: Option<LevelUp> },
    /// Run is over
    Ended(RunSummary),
}

impl TickOutcome {
    /// True if the body changed this tick
    pub fn committed(&self) -> bool {
        match self {
            TickOutcome::Moved | TickOutcome::Grew { .. } => true,
            TickOutcome::Ended(summary) => summary.cause == EndCause::GridFull,
            TickOutcome::Skipped => false,
        }
    }
}

impl GameEngine {
    /// Advance the run by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != RunState::Running {
            return TickOutcome::Skipped;
        }

        // The turn was checked when buffered; re-check against the
        // direction it is applied to
        if let Some(next) = self.pending.take() {
            if !next.reverses(self.direction) {
                self.direction = next;
            }
        }

        let head = self.grid.resolve(self.body.head().step(self.direction));
        let eats = self.food == Some(head);

        match judge(&self.grid, head, self.body.obstacles(!eats)) {
            Collision::Safe => {}
            Collision::Wall => return self.finish(EndCause::Wall),
            Collision::Body => return self.finish(EndCause::Body),
        }

        self.body.push_head(head);
        self.ticks += 1;

        if !eats {
            self.body.pop_tail();
            return TickOutcome::Moved;
        }

        self.score = self.score.saturating_add(self.food_reward);
        let level = self.curve.level(self.score);
        let level_up = if level > self.level {
            self.level = level;
            let interval = self.curve.interval(level);
            log::info!("Level {level}, tick interval {} ms", interval.as_millis());
            Some(LevelUp { level, interval })
        } else {
            None
        };

        match self.spawner.spawn(&self.grid, &self.body.occupied()) {
            Ok(cell) => {
                self.food = Some(cell);
                TickOutcome::Grew { level_up }
            }
            Err(err) => {
                log::info!("{err}");
                self.food = None;
                self.finish(EndCause::GridFull)
            }
        }
    }

    fn finish(&mut self, cause: EndCause) -> TickOutcome {
        self.phase = RunState::Over;
        self.pending = None;
        log::info!(
            "Game over ({cause:?}) with score {} at level {} after {} ticks",
            self.score,
            self.level,
            self.ticks
        );
        TickOutcome::Ended(RunSummary {
            cause,
            score: self.score,
            level: self.level,
            length: self.body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::grid::{Boundary, Cell};
    use crate::sim::snake::Direction;
    use crate::sim::state::Layout;

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    fn running(settings: &Settings, body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameEngine {
        let layout = Layout {
            body: cells(body),
            direction,
            food: food.into(),
        };
        let mut engine = GameEngine::from_layout(settings, 7, layout).unwrap();
        engine.start();
        engine
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut engine = GameEngine::with_seed(&Settings::default(), 1).unwrap();
        let before = engine.snapshot();
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_tick_moves() {
        let mut engine = running(&Settings::default(), &[(5, 5), (4, 5), (3, 5)], Direction::Right, (15, 15));
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.body().to_vec(), cells(&[(6, 5), (5, 5), (4, 5)]));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_tick_eats() {
        let mut engine = running(&Settings::default(), &[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        assert_eq!(engine.tick(), TickOutcome::Grew { level_up: None });
        assert_eq!(engine.body().to_vec(), cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.level(), 1);
        let food = engine.food().unwrap();
        assert!(!engine.body().contains(food));
    }

    #[test]
    fn test_wall_leaves_body_untouched() {
        let mut engine = running(&Settings::default(), &[(0, 5), (1, 5), (2, 5)], Direction::Left, (9, 9));
        let before = engine.body().clone();
        let outcome = engine.tick();
        assert!(matches!(
            outcome,
            TickOutcome::Ended(RunSummary {
                cause: EndCause::Wall,
                ..
            })
        ));
        assert!(!outcome.committed());
        assert_eq!(engine.phase(), RunState::Over);
        assert_eq!(engine.body(), &before);
        assert_eq!(engine.tick(), TickOutcome::Skipped);
    }

    #[test]
    fn test_wrap_boundary() {
        let settings = Settings {
            boundary: Boundary::Wrap,
            ..Default::default()
        };
        let mut engine = running(&settings, &[(0, 5), (1, 5), (2, 5)], Direction::Left, (9, 9));
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.body().head(), Cell::new(19, 5));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut engine = running(&Settings::default(), &[(5, 5), (4, 5), (3, 5)], Direction::Right, (15, 15));
        engine.steer(Direction::Left);
        engine.tick();
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.body().head(), Cell::new(6, 5));
    }

    #[test]
    fn test_last_turn_wins() {
        let mut engine = running(&Settings::default(), &[(5, 5), (4, 5), (3, 5)], Direction::Right, (15, 15));
        engine.steer(Direction::Up);
        engine.steer(Direction::Down);
        engine.tick();
        assert_eq!(engine.direction(), Direction::Down);
        assert_eq!(engine.body().head(), Cell::new(5, 6));
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn test_head_may_follow_moving_tail() {
        // Square loop; the head moves onto the cell the tail leaves
        let mut engine = running(
            &Settings::default(),
            &[(5, 4), (4, 4), (4, 5), (5, 5)],
            Direction::Down,
            (15, 15),
        );
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.body().head(), Cell::new(5, 5));
        assert!(!engine.body().self_intersects());
    }

    #[test]
    fn test_head_on_growing_tail_is_fatal() {
        // Same loop, but food sits under the tail so the tail stays
        let mut engine = running(
            &Settings::default(),
            &[(5, 4), (4, 4), (4, 5), (5, 5)],
            Direction::Down,
            (15, 15),
        );
        engine.food = Some(Cell::new(5, 5));
        let outcome = engine.tick();
        assert!(matches!(
            outcome,
            TickOutcome::Ended(RunSummary {
                cause: EndCause::Body,
                ..
            })
        ));
    }

    #[test]
    fn test_level_up_reports_interval() {
        let mut engine = running(&Settings::default(), &[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        engine.score = 40;
        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Grew {
                level_up: Some(LevelUp {
                    level: 2,
                    interval: Duration::from_millis(180),
                })
            }
        );
        assert_eq!(engine.interval(), Duration::from_millis(180));
    }

    #[test]
    fn test_huge_reward_saturates_score() {
        let settings = Settings {
            food_reward: 3_000_000_000,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        let mut engine = running(&settings, &[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        assert!(matches!(engine.tick(), TickOutcome::Grew { .. }));
        assert_eq!(engine.score(), 3_000_000_000);

        engine.food = Some(Cell::new(7, 5));
        assert!(matches!(engine.tick(), TickOutcome::Grew { .. }));
        assert_eq!(engine.score(), u32::MAX);
        assert_eq!(engine.phase(), RunState::Running);
    }

    #[test]
    fn test_filling_the_grid_ends_run() {
        let settings = Settings {
            grid_size: 2,
            initial_length: 1,
            ..Default::default()
        };
        // Three of four cells occupied; eating the last free cell fills the grid
        let mut engine = running(&settings, &[(0, 1), (0, 0), (1, 0)], Direction::Right, (1, 1));
        let outcome = engine.tick();
        assert!(matches!(
            outcome,
            TickOutcome::Ended(RunSummary {
                cause: EndCause::GridFull,
                score: 10,
                length: 4,
                ..
            })
        ));
        assert!(outcome.committed());
        assert_eq!(engine.phase(), RunState::Over);
        assert_eq!(engine.food(), None);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = GameEngine::with_seed(&settings, 99).unwrap();
        let mut b = GameEngine::with_seed(&settings, 99).unwrap();
        a.start();
        b.start();
        let turns = [Some(Direction::Up), None, Some(Direction::Right), None, Some(Direction::Down)];
        for turn in turns {
            if let Some(dir) = turn {
                a.steer(dir);
                b.steer(dir);
            }
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

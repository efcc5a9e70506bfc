//! Game engine state and run lifecycle
//!
//! One `GameEngine` owns one run at a time. Nothing here is global, so any
//! number of engines can coexist.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::food::FoodSpawner;
use super::grid::{Cell, Grid};
use super::snake::{Direction, SnakeBody};
use crate::error::{LayoutError, SettingsError};
use crate::settings::Settings;

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// No run started yet
    Idle,
    /// Ticks advance the snake
    Running,
    /// Ticking halted, run preserved
    Paused,
    /// Run ended; only `reset` leaves this state
    Over,
}

/// Explicit starting position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Head first
    pub body: Vec<Cell>,
    pub direction: Direction,
    pub food: Cell,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Head first
    pub body: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub level: u32,
    pub phase: RunState,
}

/// The snake simulation
#[derive(Debug, Clone)]
pub struct GameEngine {
    pub(crate) grid: Grid,
    pub(crate) curve: DifficultyCurve,
    pub(crate) food_reward: u32,
    pub(crate) initial_length: usize,
    pub(crate) spawner: FoodSpawner,
    pub(crate) phase: RunState,
    pub(crate) body: SnakeBody,
    pub(crate) food: Option<Cell>,
    pub(crate) direction: Direction,
    /// Latest accepted turn since the previous tick
    pub(crate) pending: Option<Direction>,
    pub(crate) score: u32,
    pub(crate) level: u32,
    /// Committed ticks in the current run
    pub(crate) ticks: u64,
}

impl GameEngine {
    /// Create an idle engine; the food seed comes from the settings or is
    /// drawn at random
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    /// Create an idle engine with a fixed food seed
    pub fn with_seed(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let grid = settings.grid();
        let body = SnakeBody::new(grid.spawn_body(settings.initial_length)).ok_or(SettingsError::EmptySnake)?;
        let mut engine = Self {
            grid,
            curve: settings.curve(),
            food_reward: settings.food_reward,
            initial_length: settings.initial_length,
            spawner: FoodSpawner::new(seed),
            phase: RunState::Idle,
            body,
            food: None,
            direction: Direction::Right,
            pending: None,
            score: 0,
            level: 1,
            ticks: 0,
        };
        engine.reset();
        Ok(engine)
    }

    /// Create an idle engine from an explicit body, direction and food cell
    pub fn from_layout(settings: &Settings, seed: u64, layout: Layout) -> Result<Self, LayoutError> {
        let mut engine = Self::with_seed(settings, seed)?;
        let grid = engine.grid;
        for (i, cell) in layout.body.iter().enumerate() {
            if !grid.contains(*cell) {
                return Err(LayoutError::OutOfBounds { x: cell.x, y: cell.y });
            }
            if layout.body[..i].contains(cell) {
                return Err(LayoutError::DuplicateCell { x: cell.x, y: cell.y });
            }
        }
        if !grid.contains(layout.food) {
            return Err(LayoutError::OutOfBounds {
                x: layout.food.x,
                y: layout.food.y,
            });
        }
        if layout.body.contains(&layout.food) {
            return Err(LayoutError::FoodOnBody);
        }
        engine.body = SnakeBody::new(layout.body).ok_or(LayoutError::EmptyBody)?;
        engine.direction = layout.direction;
        engine.food = Some(layout.food);
        Ok(engine)
    }

    /// Put the engine back to its initial idle state, discarding the run
    pub fn reset(&mut self) {
        let cells = self.grid.spawn_body(self.initial_length);
        if let Some(body) = SnakeBody::new(cells) {
            self.body = body;
        }
        self.direction = Direction::Right;
        self.pending = None;
        self.score = 0;
        self.level = 1;
        self.ticks = 0;
        self.phase = RunState::Idle;
        match self.spawner.spawn(&self.grid, &self.body.occupied()) {
            Ok(cell) => self.food = Some(cell),
            Err(err) => {
                log::warn!("Cannot place food after reset: {err}");
                self.food = None;
                self.phase = RunState::Over;
            }
        }
    }

    /// Start an idle run or resume a paused one
    pub fn start(&mut self) {
        match self.phase {
            RunState::Idle => {
                log::info!("Run started");
                self.phase = RunState::Running;
            }
            RunState::Paused => self.resume(),
            RunState::Running | RunState::Over => {
                log::debug!("start ignored in {:?}", self.phase);
            }
        }
    }

    pub fn pause(&mut self) {
        if self.phase == RunState::Running {
            log::info!("Paused at score {}", self.score);
            self.phase = RunState::Paused;
        } else {
            log::debug!("pause ignored in {:?}", self.phase);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunState::Paused {
            log::info!("Resumed");
            self.phase = RunState::Running;
        } else {
            log::debug!("resume ignored in {:?}", self.phase);
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            _ => log::debug!("pause toggle ignored in {:?}", self.phase),
        }
    }

    /// Reset and immediately start a fresh run
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Buffer a turn for the next tick.
    ///
    /// Only accepted while running. A turn that reverses the current
    /// direction is dropped; otherwise it replaces any earlier pending turn.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.phase != RunState::Running {
            return false;
        }
        if dir.reverses(self.direction) {
            log::debug!("Rejected reversal {:?} -> {:?}", self.direction, dir);
            return false;
        }
        self.pending = Some(dir);
        true
    }

    pub fn phase(&self) -> RunState {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Tick interval for the current level
    pub fn interval(&self) -> Duration {
        self.curve.interval(self.level)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.body.to_vec(),
            food: self.food,
            score: self.score,
            level: self.level,
            phase: self.phase,
        }
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Discrete ticks only, driven from outside
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;
pub mod timer;

pub use autopilot::Autopilot;
pub use collision::{Collision, judge};
pub use difficulty::DifficultyCurve;
pub use food::FoodSpawner;
pub use grid::{Boundary, Cell, Grid, PixelRect};
pub use snake::{Direction, SnakeBody};
pub use state::{GameEngine, Layout, RunState, Snapshot};
pub use tick::{EndCause, LevelUp, RunSummary, TickOutcome};
pub use timer::TickTimer;

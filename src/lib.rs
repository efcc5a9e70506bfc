//! Grid Snake - a grid snake game with a persisted leaderboard
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, collisions, ticks)
//! - `leaderboard`: Top-10 best scores, one per player
//! - `accounts`: Player accounts and high scores
//! - `persistence`: Import/export with integrity verification
//! - `renderer`: Snapshot presentation
//! - `session`: Engine, timer and collaborators wired together
//! - `settings`: Data-driven game tuning

pub mod accounts;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use accounts::{Account, AccountStore, Avatar, MemoryAccountStore, UserId};
pub use error::{AccountError, GridFull, LayoutError, MalformedImportError, PersistenceError, SettingsError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use renderer::{Renderer, TextRenderer};
pub use session::Session;
pub use settings::Settings;

/// Default game constants, mirrored by [`Settings::default`]
pub mod consts {
    /// Cells per side
    pub const GRID_SIZE: i32 = 20;
    /// Canvas pixels per cell
    pub const CELL_SIZE: u32 = 20;
    /// Snake length at spawn
    pub const INITIAL_LENGTH: usize = 3;
    /// Points per food
    pub const FOOD_REWARD: u32 = 10;
    /// Points per level
    pub const LEVEL_THRESHOLD: u32 = 50;
    /// Tick interval at level 1
    pub const BASE_INTERVAL_MS: u64 = 200;
    /// Interval reduction per level
    pub const INTERVAL_STEP_MS: u64 = 20;
    /// Interval floor
    pub const MIN_INTERVAL_MS: u64 = 50;
}

//! Error types
//!
//! Invalid state transitions (pausing an idle engine, starting a finished
//! run) are not errors: the engine ignores them.

use thiserror::Error;

/// No free cell is left for food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell left on a {size}x{size} grid")]
pub struct GridFull {
    pub size: i32,
}

/// Rejected game settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("grid size must be positive, got {0}")]
    GridSize(i32),
    #[error("grid of size {size} cannot hold a {length}-cell snake plus food")]
    GridTooSmall { size: i32, length: usize },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("level threshold must be positive")]
    ZeroThreshold,
    #[error("minimum interval ({min} ms) exceeds base interval ({base} ms)")]
    IntervalOrder { min: u64, base: u64 },
    #[error("minimum interval must be positive")]
    ZeroInterval,
}

/// Rejected explicit starting layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("snake body is empty")]
    EmptyBody,
    #[error("cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cell ({x}, {y}) appears twice in the snake body")]
    DuplicateCell { x: i32, y: i32 },
    #[error("food overlaps the snake body")]
    FoodOnBody,
}

/// Account registration and login failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("username and password are required")]
    MissingField,
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),
    #[error("wrong username or password")]
    InvalidCredentials,
}

/// Imported data rejected at the DataPort boundary
#[derive(Debug, Error)]
pub enum MalformedImportError {
    #[error("import is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("import must be a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be an array")]
    NotAnArray(&'static str),
    #[error("unsupported data version {0}")]
    UnsupportedVersion(u64),
    #[error("integrity digest does not match the data")]
    DigestMismatch,
    #[error("user id {0} appears more than once")]
    DuplicateUserId(u64),
    #[error("username `{0}` appears more than once")]
    DuplicateUsername(String),
    #[error("leaderboard lists user id {0} more than once")]
    DuplicateEntry(u64),
    #[error("account `{0}` has a malformed password digest")]
    BadDigest(String),
}

/// File persistence failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not encode data: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedImportError),
}

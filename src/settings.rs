//! Game settings
//!
//! Persisted as JSON next to the save data. Missing or unreadable files fall
//! back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PersistenceError, SettingsError};
use crate::sim::{Boundary, DifficultyCurve, Grid};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Cells per side
    pub grid_size: i32,
    /// Canvas pixels per cell
    pub cell_size: u32,
    /// Edge behaviour
    pub boundary: Boundary,
    /// Snake length at spawn
    pub initial_length: usize,

    // === Scoring ===
    /// Points per food
    pub food_reward: u32,
    /// Points per level
    pub level_threshold: u32,

    // === Speed ===
    /// Tick interval at level 1 (ms)
    pub base_interval_ms: u64,
    /// Interval reduction per level (ms)
    pub interval_step_ms: u64,
    /// Interval floor (ms)
    pub min_interval_ms: u64,

    /// Fixed food RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            boundary: Boundary::Walls,
            initial_length: INITIAL_LENGTH,

            food_reward: FOOD_REWARD,
            level_threshold: LEVEL_THRESHOLD,

            base_interval_ms: BASE_INTERVAL_MS,
            interval_step_ms: INTERVAL_STEP_MS,
            min_interval_ms: MIN_INTERVAL_MS,

            seed: None,
        }
    }
}

impl Settings {
    /// Check the settings describe a playable game
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_size <= 0 {
            return Err(SettingsError::GridSize(self.grid_size));
        }
        if self.initial_length == 0 {
            return Err(SettingsError::EmptySnake);
        }
        // The spawn row runs left from the centre and needs one cell for food
        let fits_row = self.initial_length as i64 <= i64::from(self.grid_size / 2) + 1;
        if !fits_row || self.grid().area() <= self.initial_length {
            return Err(SettingsError::GridTooSmall {
                size: self.grid_size,
                length: self.initial_length,
            });
        }
        if self.level_threshold == 0 {
            return Err(SettingsError::ZeroThreshold);
        }
        if self.min_interval_ms == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(SettingsError::IntervalOrder {
                min: self.min_interval_ms,
                base: self.base_interval_ms,
            });
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size, self.cell_size, self.boundary)
    }

    pub fn curve(&self) -> DifficultyCurve {
        DifficultyCurve {
            level_threshold: self.level_threshold,
            base_interval_ms: self.base_interval_ms,
            step_ms: self.interval_step_ms,
            min_interval_ms: self.min_interval_ms,
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable settings in {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self).map_err(PersistenceError::Encode)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

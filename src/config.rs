//! Game tuning constants

use log::LevelFilter;

use crate::error::{GameError, Result};
use crate::{Coords, GridInt};

/// Side length of one grid cell, in game units
pub const CELL_SIZE: GridInt = 10;

/// Seconds between simulation steps at the start of a session
pub const INITIAL_MOVEMENT_INTERVAL: f64 = 0.1;

/// Applied to the movement interval every time food is eaten
pub const SPEED_UP_FACTOR: f64 = 0.9;

/// Where the first food of a session is placed, if it fits the viewport
pub const INITIAL_FOOD: Coords = (400, 200);

pub const TARGET_FPS: u32 = 60;

pub const LOG_FILE: &str = "gridsnake.log";
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Per-session tuning, handed to a `Session` when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub cell_size: GridInt,
    pub initial_interval: f64,
    pub speed_up: f64,
    pub initial_food: Coords,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cell_size: CELL_SIZE,
            initial_interval: INITIAL_MOVEMENT_INTERVAL,
            speed_up: SPEED_UP_FACTOR,
            initial_food: INITIAL_FOOD,
        }
    }
}

impl GameConfig {
    /// Rejects values the grid math and the speed-up can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(GameError::InvalidConfig(format!("cell size must be positive, got {}", self.cell_size)));
        }

        if !(self.initial_interval > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "movement interval must be positive, got {}",
                self.initial_interval
            )));
        }

        if !(self.speed_up > 0.0 && self.speed_up < 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "speed-up factor must be between 0 and 1, got {}",
                self.speed_up
            )));
        }

        Ok(())
    }
}
